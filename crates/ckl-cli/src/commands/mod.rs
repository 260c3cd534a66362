pub mod checklist;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod schema;
pub mod shared;
pub mod show;
pub mod task;
pub mod undo;
