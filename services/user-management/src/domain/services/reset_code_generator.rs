//! 重置凭证生成

use rand::Rng;
use telex_common::utils::random_hex_id;

use crate::domain::value_objects::{ResetChannel, ResetCredential};

/// 移动端验证码的取值范围（闭区间）
pub const MOBILE_CODE_MIN: u32 = 100_000;
pub const MOBILE_CODE_MAX: u32 = 999_999;

/// 按渠道生成重置凭证
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetCodeGenerator;

impl ResetCodeGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, channel: ResetChannel) -> ResetCredential {
        match channel {
            ResetChannel::Web => self.generate_web_token(),
            ResetChannel::Mobile => self.generate_mobile_code(),
        }
    }

    /// UUID v4 的无连字符十六进制形式
    pub fn generate_web_token(&self) -> ResetCredential {
        ResetCredential::WebToken(random_hex_id())
    }

    pub fn generate_mobile_code(&self) -> ResetCredential {
        self.generate_mobile_code_with(&mut rand::thread_rng())
    }

    pub fn generate_mobile_code_with<R: Rng + ?Sized>(&self, rng: &mut R) -> ResetCredential {
        let code = rng.gen_range(MOBILE_CODE_MIN..=MOBILE_CODE_MAX);
        ResetCredential::MobileCode(format!("{:06}", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_web_token_format() {
        let credential = ResetCodeGenerator::new().generate(ResetChannel::Web);

        assert_eq!(credential.channel(), ResetChannel::Web);
        assert_eq!(credential.as_str().len(), 32);
        assert!(credential.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_mobile_code_format() {
        let credential = ResetCodeGenerator::new().generate(ResetChannel::Mobile);

        assert_eq!(credential.channel(), ResetChannel::Mobile);
        assert_eq!(credential.as_str().len(), 6);
        assert!(credential.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_mobile_code_is_deterministic_for_seeded_rng() {
        let generator = ResetCodeGenerator::new();

        let a = generator.generate_mobile_code_with(&mut StdRng::seed_from_u64(7));
        let b = generator.generate_mobile_code_with(&mut StdRng::seed_from_u64(7));

        assert_eq!(a, b);
    }
}
