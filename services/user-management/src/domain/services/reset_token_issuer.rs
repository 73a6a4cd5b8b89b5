//! 访问令牌签发

use telex_auth_core::TokenService;
use telex_errors::AppResult;

use crate::domain::user::User;

/// 把用户当前的重置凭证封装进一个限时的签名令牌
#[cfg_attr(test, mockall::automock)]
pub trait ResetTokenIssuer: Send + Sync {
    fn sign(&self, user: &User, validity_minutes: i64) -> AppResult<String>;
}

impl ResetTokenIssuer for TokenService {
    fn sign(&self, user: &User, validity_minutes: i64) -> AppResult<String> {
        let reset_token = user.password_reset_token.as_deref().unwrap_or_default();

        self.generate_password_reset_token(
            &user.id,
            user.email.as_str(),
            reset_token,
            validity_minutes,
        )
    }
}
