//! # ckl-store
//!
//! File-backed checklist storage for Checklist++.
//!
//! Each checklist is one pretty-printed JSON file in the data directory,
//! rewritten atomically after every mutation. A `ChecklistStore` owns one
//! file plus its single-level undo history; a `ChecklistManager` owns every
//! store in the directory and tracks which one is active.

pub mod clock;
pub mod error;
pub mod export;
pub mod import;
pub mod kanban;
pub mod manager;
pub mod persist;
pub mod state;
pub mod store;
pub mod undo;
pub mod updates;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ErrorKind, StoreError};
pub use kanban::KanbanBoard;
pub use manager::{ChecklistManager, DEFAULT_CHECKLIST};
pub use store::ChecklistStore;
pub use updates::task::{TaskUpdate, TaskUpdateBuilder};
