//! telex-auth-core - 认证核心库
//!
//! JWT Claims 与签发/校验逻辑

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use telex_common::UserId;
use telex_errors::{AppError, AppResult};
use uuid::Uuid;

/// 密码重置令牌类型
pub const PASSWORD_RESET_TOKEN_TYPE: &str = "password_reset";

/// JWT Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User email
    pub email: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    /// Issuer
    #[serde(default)]
    pub iss: String,
    /// Audience
    #[serde(default)]
    pub aud: String,
    /// Token type
    #[serde(default)]
    pub token_type: String,
    /// Pending password reset credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

impl Claims {
    pub fn new(
        user_id: &UserId,
        email: &str,
        expires_in_secs: i64,
        token_type: &str,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.0.to_string(),
            email: email.to_string(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            token_type: token_type.to_string(),
            reset_token: None,
        }
    }

    pub fn with_reset_token(mut self, reset_token: impl Into<String>) -> Self {
        self.reset_token = Some(reset_token.into());
        self
    }

    pub fn user_id(&self) -> AppResult<UserId> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from_uuid)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    /// 验证 token 类型
    pub fn is_password_reset_token(&self) -> bool {
        self.token_type == PASSWORD_RESET_TOKEN_TYPE
    }
}

/// Token 服务
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl TokenService {
    pub fn new(secret: &str, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// 生成携带重置凭证的短时令牌
    pub fn generate_password_reset_token(
        &self,
        user_id: &UserId,
        email: &str,
        reset_token: &str,
        expires_in_minutes: i64,
    ) -> AppResult<String> {
        let claims = Claims::new(
            user_id,
            email,
            expires_in_minutes * 60,
            PASSWORD_RESET_TOKEN_TYPE,
            &self.issuer,
            &self.audience,
        )
        .with_reset_token(reset_token);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
    }

    /// 验证令牌
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0; // 不允许时间偏差

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        if claims.token_type.is_empty() {
            return Err(AppError::unauthorized("Token type not specified"));
        }

        if claims.jti.is_empty() {
            return Err(AppError::unauthorized("Token ID (jti) missing"));
        }

        Ok(claims)
    }

    /// 验证密码重置令牌（确保类型正确且携带重置凭证）
    pub fn validate_password_reset_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.validate_token(token)?;

        if !claims.is_password_reset_token() {
            return Err(AppError::unauthorized("Not a password reset token"));
        }

        if claims.reset_token.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::unauthorized("Reset credential missing"));
        }

        Ok(claims)
    }
}
