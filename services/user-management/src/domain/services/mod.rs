mod password_reset_notifier;
mod reset_code_generator;
mod reset_token_issuer;

pub use password_reset_notifier::*;
pub use reset_code_generator::*;
pub use reset_token_issuer::*;
