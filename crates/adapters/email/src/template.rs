//! 邮件模板系统

use std::collections::HashMap;
use telex_errors::{AppError, AppResult};
use tera::Tera;

const FORGOT_PASSWORD_HTML: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <p>Hi {{ name }},</p>
    <p>We received a request to reset the password of your account.</p>
    <p><a href="{{ link }}">Reset your password</a></p>
    <p>If you did not request a password reset, you can safely ignore this email.</p>
    <p>&copy; {{ year }} Telex</p>
  </body>
</html>
"#;

const FORGOT_PASSWORD_TXT: &str = r#"Hi {{ name }},

We received a request to reset the password of your account.
Open the link below to choose a new password:

{{ link }}

If you did not request a password reset, you can safely ignore this email.

(c) {{ year }} Telex
"#;

const FORGOT_PASSWORD_MOBILE_HTML: &str = r#"<!DOCTYPE html>
<html>
  <body>
    <p>Hi {{ name }},</p>
    <p>We received a request to reset the password of your account.</p>
    <p>Your reset code is <strong>{{ code }}</strong>.</p>
    <p>If you did not request a password reset, you can safely ignore this email.</p>
    <p>&copy; {{ year }} Telex</p>
  </body>
</html>
"#;

const FORGOT_PASSWORD_MOBILE_TXT: &str = r#"Hi {{ name }},

We received a request to reset the password of your account.
Your reset code is {{ code }}.

If you did not request a password reset, you can safely ignore this email.

(c) {{ year }} Telex
"#;

/// 渲染结果（HTML + 纯文本）
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

/// 邮件模板管理器
pub struct EmailTemplate {
    tera: Tera,
}

impl EmailTemplate {
    /// 使用内置模板
    pub fn with_defaults() -> AppResult<Self> {
        let templates = [
            ("forgot_password.html", FORGOT_PASSWORD_HTML),
            ("forgot_password.txt", FORGOT_PASSWORD_TXT),
            ("forgot_password_mobile.html", FORGOT_PASSWORD_MOBILE_HTML),
            ("forgot_password_mobile.txt", FORGOT_PASSWORD_MOBILE_TXT),
        ]
        .into_iter()
        .map(|(name, content)| (name.to_string(), content.to_string()))
        .collect();

        Self::from_strings(templates)
    }

    /// 从内存中的模板字符串创建
    pub fn from_strings(templates: HashMap<String, String>) -> AppResult<Self> {
        let mut tera = Tera::default();

        for (name, content) in templates {
            tera.add_raw_template(&name, &content).map_err(|e| {
                AppError::internal(format!("Failed to add template {}: {}", name, e))
            })?;
        }

        Ok(Self { tera })
    }

    /// 渲染模板
    pub fn render(&self, template_name: &str, context: &serde_json::Value) -> AppResult<String> {
        let context = tera::Context::from_serialize(context)
            .map_err(|e| AppError::internal(format!("Failed to create template context: {}", e)))?;

        self.tera.render(template_name, &context).map_err(|e| {
            AppError::internal(format!(
                "Failed to render template {}: {}",
                template_name, e
            ))
        })
    }

    /// 渲染密码重置邮件（Web，包含重置链接）
    pub fn render_forgot_password(
        &self,
        name: &str,
        link: &str,
        year: i32,
    ) -> AppResult<RenderedEmail> {
        let context = serde_json::json!({
            "name": name,
            "link": link,
            "year": year,
        });

        self.render_pair("forgot_password", &context)
    }

    /// 渲染密码重置邮件（移动端，包含六位验证码）
    pub fn render_forgot_password_mobile(
        &self,
        name: &str,
        code: &str,
        year: i32,
    ) -> AppResult<RenderedEmail> {
        let context = serde_json::json!({
            "name": name,
            "code": code,
            "year": year,
        });

        self.render_pair("forgot_password_mobile", &context)
    }

    fn render_pair(&self, base: &str, context: &serde_json::Value) -> AppResult<RenderedEmail> {
        Ok(RenderedEmail {
            html: self.render(&format!("{}.html", base), context)?,
            text: self.render(&format!("{}.txt", base), context)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_from_strings() {
        let mut templates = HashMap::new();
        templates.insert(
            "test.html".to_string(),
            "<h1>Hello {{ name }}!</h1>".to_string(),
        );

        let template = EmailTemplate::from_strings(templates).unwrap();

        let context = serde_json::json!({
            "name": "World"
        });

        let result = template.render("test.html", &context).unwrap();
        assert_eq!(result, "<h1>Hello World!</h1>");
    }

    #[test]
    fn test_render_forgot_password_contains_link() {
        let template = EmailTemplate::with_defaults().unwrap();
        let link = "https://app.telex.im/reset-password?access_token=abc.def.ghi";

        let email = template.render_forgot_password("Ada", link, 2026).unwrap();

        assert!(email.text.contains(link));
        assert!(email.text.contains("Hi Ada"));
        assert!(email.html.contains("2026"));
    }

    #[test]
    fn test_render_forgot_password_mobile_contains_code() {
        let template = EmailTemplate::with_defaults().unwrap();

        let email = template
            .render_forgot_password_mobile("Ada", "482913", 2026)
            .unwrap();

        assert!(email.text.contains("482913"));
        assert!(email.html.contains("<strong>482913</strong>"));
        assert!(!email.text.contains("reset-password?"));
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let template = EmailTemplate::with_defaults().unwrap();
        assert!(template.render("missing.html", &serde_json::json!({})).is_err());
    }
}
