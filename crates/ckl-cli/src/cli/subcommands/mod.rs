mod checklist;
mod task;

pub use checklist::ChecklistCommands;
pub use task::TaskCommands;
