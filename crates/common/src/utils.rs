//! 通用工具函数

use uuid::Uuid;

/// 生成新的 UUID v4（随机）
pub fn random_id() -> Uuid {
    Uuid::new_v4()
}

/// 生成不含连字符的随机十六进制串（32 个字符，128 位）
pub fn random_hex_id() -> String {
    random_id().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_hex_id_format() {
        let id = random_hex_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_hex_id_unique() {
        assert_ne!(random_hex_id(), random_hex_id());
    }
}
