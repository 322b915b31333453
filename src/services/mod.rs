pub mod chat;
pub mod history;
pub mod summarize;
pub mod visitor;
