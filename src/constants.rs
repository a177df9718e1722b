use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Upper bound on the number of images a project may carry.
pub const MAX_PROJECT_IMAGES: usize = 20;

/// Per-file upload limit (5MB).
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Validity window of a password-reset token.
pub const RESET_TOKEN_TTL_SECS: i64 = 60 * 60;
