//! 基础设施层

pub mod notifications;
pub mod observability;
pub mod persistence;
