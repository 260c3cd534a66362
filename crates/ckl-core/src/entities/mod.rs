//! Entity structs for Checklist++ domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation of checklist files.

mod checklist;
mod task;

pub use checklist::{CHECKLIST_FILE_VERSION, ChecklistFile, id_after};
pub use task::{MAX_PROGRESS, Task};
