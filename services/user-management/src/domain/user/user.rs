//! 用户实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use telex_common::{AuditInfo, UserId};
use telex_domain_core::{AggregateRoot, Entity};

use crate::domain::value_objects::{Email, ResetCredential};

/// 用户实体
///
/// `password_reset_token` 只在签发之后、被消费或过期之前有值；
/// 有值本身并不代表凭证仍然有效。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_reset_token: Option<String>,
    pub password_reset_token_time: Option<DateTime<Utc>>,
    pub audit_info: AuditInfo,
}

impl User {
    pub fn new(email: Email, first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            email,
            first_name,
            last_name,
            password_reset_token: None,
            password_reset_token_time: None,
            audit_info: AuditInfo::default(),
        }
    }

    /// 邮件中的称呼：名 → 姓 → 邮箱本地部分
    pub fn display_name(&self) -> String {
        [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(|name| name.trim())
            .find(|name| !name.is_empty())
            .unwrap_or_else(|| self.email.local_part())
            .to_string()
    }

    /// 写入新的重置凭证，覆盖之前未消费的凭证
    pub fn assign_reset_credential(&mut self, credential: &ResetCredential) {
        self.password_reset_token = Some(credential.as_str().to_string());
    }

    /// 记录签发时间
    pub fn mark_reset_issued(&mut self, issued_at: DateTime<Utc>) {
        self.password_reset_token_time = Some(issued_at);
        self.touch();
    }

    pub fn matches_reset_credential(&self, candidate: &str) -> bool {
        self.password_reset_token.as_deref() == Some(candidate)
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl AggregateRoot for User {
    fn audit_info(&self) -> &AuditInfo {
        &self.audit_info
    }

    fn audit_info_mut(&mut self) -> &mut AuditInfo {
        &mut self.audit_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        User::new(
            Email::new("ada@example.com").unwrap(),
            first.map(str::to_string),
            last.map(str::to_string),
        )
    }

    #[test]
    fn test_display_name_fallback_chain() {
        assert_eq!(user(Some("Ada"), Some("Lovelace")).display_name(), "Ada");
        assert_eq!(user(None, Some("Lovelace")).display_name(), "Lovelace");
        assert_eq!(user(Some("  "), None).display_name(), "ada");
        assert_eq!(user(None, None).display_name(), "ada");
    }

    #[test]
    fn test_assign_reset_credential_overwrites() {
        let mut user = user(Some("Ada"), None);

        user.assign_reset_credential(&ResetCredential::MobileCode("111111".to_string()));
        user.assign_reset_credential(&ResetCredential::MobileCode("222222".to_string()));

        assert!(user.matches_reset_credential("222222"));
        assert!(!user.matches_reset_credential("111111"));
    }

    #[test]
    fn test_mark_reset_issued() {
        let mut user = user(Some("Ada"), None);
        let now = Utc::now();

        user.mark_reset_issued(now);

        assert_eq!(user.password_reset_token_time, Some(now));
        assert!(user.audit_info.updated_at >= user.audit_info.created_at);
    }
}
