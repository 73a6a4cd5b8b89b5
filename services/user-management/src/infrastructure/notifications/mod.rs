mod queued_password_reset_notifier;

pub use queued_password_reset_notifier::*;
