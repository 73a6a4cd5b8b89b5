//! telex-cqrs-core - CQRS 核心库
//!
//! Command trait、Handler 与进程内 Command Bus（mediator）

mod bus;
mod command;

pub use bus::*;
pub use command::*;
