//! Terminal views of a checklist: the task list and the kanban board.

pub mod color;
pub mod kanban;
pub mod list;

use ckl_config::CklConfig;
use ckl_core::enums::ViewKind;

/// Display toggles. Seeded from `[display]` config; the shell flips them at
/// runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayPrefs {
    pub color: bool,
    pub simple_view: bool,
    pub one_line: bool,
    pub menu_visible: bool,
    pub kanban: bool,
    pub kanban_horizontal: bool,
}

impl DisplayPrefs {
    /// `color_allowed` comes from `--color` and the terminal; config can only
    /// turn color off.
    #[must_use]
    pub const fn from_config(config: &CklConfig, color_allowed: bool) -> Self {
        Self {
            color: color_allowed && config.display.color,
            simple_view: config.display.simple_view,
            one_line: config.display.one_line,
            menu_visible: config.display.menu_visible,
            kanban: matches!(config.general.default_view, ViewKind::Kanban),
            kanban_horizontal: config.display.kanban_horizontal,
        }
    }

    #[must_use]
    pub const fn view(&self) -> ViewKind {
        if self.kanban {
            ViewKind::Kanban
        } else {
            ViewKind::Checklist
        }
    }
}
