//! 应用层

pub mod commands;
pub mod dto;
pub mod handlers;
