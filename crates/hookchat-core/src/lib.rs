pub mod config;
pub mod conversation;
pub mod draft;
pub mod error;
pub mod session;
pub mod state;
pub mod webhook;

// Re-export main types for convenience
pub use config::Config;
pub use conversation::Conversation;
pub use draft::Draft;
pub use error::SendError;
pub use session::{ChatSession, PendingSend};
pub use state::{Message, Sender};
pub use webhook::{extract_reply, WebhookClient, FALLBACK_REPLY};
