pub mod actions;
mod app_state;
mod attachments;
mod token_store;

pub use app_state::*;
pub use attachments::*;
pub use token_store::*;
