pub mod limiter;
pub mod mailer;
pub mod utils;
pub mod web;
