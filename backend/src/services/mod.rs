pub mod content_service;
pub mod fallback;
pub mod session_service;

pub use content_service::ContentResolver;
pub use session_service::{Session, SharedSession};
