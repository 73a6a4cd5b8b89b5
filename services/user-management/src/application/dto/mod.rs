mod api_response;
mod forgot_password;

pub use api_response::*;
pub use forgot_password::*;
