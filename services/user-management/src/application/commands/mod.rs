mod forgot_password_command;

pub use forgot_password_command::*;
