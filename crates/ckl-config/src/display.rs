//! Initial display preferences for the interactive shell.

use serde::{Deserialize, Serialize};

const fn enabled() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayConfig {
    /// Color-code tasks by priority.
    #[serde(default = "enabled")]
    pub color: bool,

    /// Show only status and title.
    #[serde(default)]
    pub simple_view: bool,

    /// Render each task on a single line.
    #[serde(default)]
    pub one_line: bool,

    /// Print the numbered menu before each prompt.
    #[serde(default = "enabled")]
    pub menu_visible: bool,

    /// Lay out the kanban board side by side instead of stacked.
    #[serde(default = "enabled")]
    pub kanban_horizontal: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            simple_view: false,
            one_line: false,
            menu_visible: true,
            kanban_horizontal: true,
        }
    }
}
