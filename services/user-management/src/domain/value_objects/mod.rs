mod email;
mod reset_channel;

pub use email::*;
pub use reset_channel::*;
