pub mod confirm;
pub mod parse;
pub mod title;
