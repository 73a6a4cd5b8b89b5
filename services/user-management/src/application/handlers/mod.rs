mod forgot_password_handler;

pub use forgot_password_handler::*;
