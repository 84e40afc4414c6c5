pub mod gemini;
pub mod reply;
pub mod traits;

pub use gemini::GeminiClient;
pub use reply::{parse_reply, ModelReply, Recommendation};
pub use traits::GenerativeClient;
