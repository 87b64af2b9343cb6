//! Masking of sensitive values inside free-form log messages.
//!
//! - `mask`: masks a single value
//! - `message`: finds configured keys in a message and masks their values

pub mod mask;
pub mod message;

pub use mask::mask_value;
pub use message::{redact_message, Redactor};
