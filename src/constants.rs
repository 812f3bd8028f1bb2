use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Maximum accepted length of a contact message, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;
