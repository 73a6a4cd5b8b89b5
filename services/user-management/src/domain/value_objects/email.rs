//! Email 值对象

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email 值对象（已去除首尾空白并转为小写）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim().to_lowercase();

        if !email_address::EmailAddress::is_valid(&email) {
            return Err(EmailError::InvalidFormat(email));
        }

        Ok(Self(email))
    }

    /// 邮箱本地部分（`@` 之前）
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(Email::new("a@b.com").is_ok());
        assert!(Email::new("user.name+tag@example.co.uk").is_ok());
    }

    #[test]
    fn test_email_is_normalized() {
        let email = Email::new("  Ada@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::new("").is_err());
        assert!(Email::new("invalid.email.com").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("test@").is_err());
    }

    #[test]
    fn test_local_part() {
        let email = Email::new("ghost@x.com").unwrap();
        assert_eq!(email.local_part(), "ghost");
    }
}
