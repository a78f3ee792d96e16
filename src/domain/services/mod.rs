pub mod actions;
mod app_state;
mod chat_panel;
mod composer;
mod execution_panel;
mod preference_store;

pub use app_state::*;
pub use chat_panel::*;
pub use composer::*;
pub use execution_panel::*;
pub use preference_store::*;
