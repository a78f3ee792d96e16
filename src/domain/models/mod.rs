mod action;
mod analysis;
mod backend;
mod chat_event;
mod conversation;
mod error;
mod event;
mod execution;
mod history;
mod language;
mod message;
mod preferences;
mod slash_commands;
mod turn;

pub use action::*;
pub use analysis::*;
pub use backend::*;
pub use chat_event::*;
pub use conversation::*;
pub use error::*;
pub use event::*;
pub use execution::*;
pub use history::*;
pub use language::*;
pub use message::*;
pub use preferences::*;
pub use slash_commands::*;
pub use turn::*;
