//! telex-config - 配置加载库
//!
//! 加载顺序：`default.toml` -> `{APP_ENV}.toml` -> `TELEX_` 前缀环境变量
//! （嵌套字段使用 `__` 分隔，例如 `TELEX_JWT__SECRET`）。

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::Secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    // 开发环境: 10, 生产环境: 50
    match std::env::var("APP_ENV").as_deref() {
        Ok("production") => 50,
        _ => 10,
    }
}

/// JWT 配置
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_audience")]
    pub audience: String,
}

fn default_issuer() -> String {
    "telex".to_string()
}

fn default_audience() -> String {
    "telex-web".to_string()
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 输出 JSON 格式日志（生产环境）
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

/// 邮件配置
///
/// `enabled = false` 时邮件只写入日志，不连接 SMTP。
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret")]
    pub password: Secret<String>,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default)]
    pub use_tls: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

fn default_from_email() -> String {
    "noreply@telex.im".to_string()
}

fn default_from_name() -> String {
    "Telex".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: empty_secret(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            use_tls: false,
            timeout_secs: default_timeout_secs(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// 密码重置配置
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetConfig {
    /// 前端地址，用于拼接重置链接
    pub frontend_url: String,
    #[serde(default = "default_token_expires_minutes")]
    pub token_expires_minutes: i64,
    #[serde(default = "default_email_subject")]
    pub email_subject: String,
}

fn default_token_expires_minutes() -> i64 {
    10
}

fn default_email_subject() -> String {
    "Telex Boilerplate".to_string()
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub server: ServerConfig,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub email: EmailConfig,
    pub password_reset: PasswordResetConfig,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());

        let figment = Figment::new()
            .merge(Toml::file(format!("{}/default.toml", config_dir)))
            .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
            .merge(Env::prefixed("TELEX_").split("__"));

        Self::from_figment(figment)
    }

    /// 从已组装好的 Figment 提取配置
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}
