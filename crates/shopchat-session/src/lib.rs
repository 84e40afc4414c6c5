pub mod error;
pub mod message;
pub mod store;

pub use error::{Result, SessionError};
pub use message::ChatMessage;
pub use store::{SessionStore, HISTORY_LIMIT};
