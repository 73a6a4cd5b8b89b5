//! 密码重置渠道与凭证

use serde::{Deserialize, Serialize};
use std::fmt;

/// 重置凭证的投递渠道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetChannel {
    /// 邮件中包含前端重置链接
    #[default]
    Web,
    /// 邮件中包含六位数字验证码
    Mobile,
}

impl ResetChannel {
    pub fn from_is_mobile(is_mobile: bool) -> Self {
        if is_mobile { Self::Mobile } else { Self::Web }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for ResetChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已签发的重置凭证
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetCredential {
    /// 32 位十六进制的不透明令牌
    WebToken(String),
    /// 六位数字验证码
    MobileCode(String),
}

impl ResetCredential {
    pub fn as_str(&self) -> &str {
        match self {
            Self::WebToken(value) | Self::MobileCode(value) => value,
        }
    }

    pub fn channel(&self) -> ResetChannel {
        match self {
            Self::WebToken(_) => ResetChannel::Web,
            Self::MobileCode(_) => ResetChannel::Mobile,
        }
    }
}
