//! User Management Service Library
//!
//! 分层结构：
//! - `domain`: 用户实体、值对象、仓储与领域服务接口
//! - `application`: 命令、处理器与 DTO
//! - `infrastructure`: 持久化、邮件通知与指标
//! - `api`: axum HTTP 路由

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod startup;
