// Request orchestration.

pub mod moderator;

pub use moderator::{Moderator, DEFAULT_REQUEST_TIMEOUT};
