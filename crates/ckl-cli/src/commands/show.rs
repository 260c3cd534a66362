use ckl_core::enums::{TaskStatus, ViewKind};
use ckl_store::KanbanBoard;
use serde_json::json;

use crate::cli::root_commands::ShowArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::render::kanban::render_kanban;
use crate::render::list::render_list;
use crate::render::DisplayPrefs;
use crate::ui;

/// Handle `ckl show`. `table` prints the terminal view; `json` and `raw`
/// print the same data structured.
pub fn handle(args: &ShowArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let view = args
        .view
        .as_deref()
        .map(|raw| parse_enum::<ViewKind>(raw, "view"))
        .transpose()?
        .unwrap_or(ctx.config.general.default_view);

    let store = ctx.store(flags)?;
    let ui = ui::prefs();
    let mut prefs = DisplayPrefs::from_config(&ctx.config, ui.color);
    prefs.kanban = view == ViewKind::Kanban;

    if flags.format != OutputFormat::Table {
        let body = match view {
            ViewKind::Checklist => json!({
                "checklist": store.name(),
                "view": view,
                "tasks": store.sorted_by_priority(),
                "summary": store.summary(),
            }),
            ViewKind::Kanban => {
                let board = KanbanBoard::build(store);
                let columns = TaskStatus::ALL
                    .iter()
                    .map(|status| (status.as_str().to_string(), json!(board.column(*status))))
                    .collect::<serde_json::Map<_, _>>();
                json!({
                    "checklist": store.name(),
                    "view": view,
                    "columns": columns,
                    "warnings": board.limit_warnings(&ctx.config.limits),
                })
            }
        };
        return output(&body, flags.format);
    }

    let rendered = match view {
        ViewKind::Checklist => render_list(
            store.name(),
            &store.sorted_by_priority(),
            store.now(),
            &prefs,
        ),
        ViewKind::Kanban => render_kanban(
            &KanbanBoard::build(store),
            &ctx.config.limits,
            &prefs,
            ui.term_width,
        ),
    };
    print!("{rendered}");
    Ok(())
}
