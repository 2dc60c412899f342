mod action;
mod attachment;
mod author;
mod chat_service;
mod credentials;
mod event;
mod message;
mod session;
mod slash_commands;
mod user;

pub use action::*;
pub use attachment::*;
pub use author::*;
pub use chat_service::*;
pub use credentials::*;
pub use event::*;
pub use message::*;
pub use session::*;
pub use slash_commands::*;
pub use user::*;
