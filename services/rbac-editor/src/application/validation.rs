//! 表单字段校验

use campus_errors::ValidationErrors;

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;
pub const PREFIX_MAX_LEN: usize = 10;

/// 逐字段收集错误，最后一次性返回
#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: ValidationErrors,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&mut self, field: &str, value: &str, max_len: usize) -> &mut Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, format!("The {} field is required.", field));
        } else if trimmed.chars().count() > max_len {
            self.push(
                field,
                format!("The {} may not be greater than {} characters.", field, max_len),
            );
        }
        self
    }

    pub fn optional(&mut self, field: &str, value: Option<&str>, max_len: usize) -> &mut Self {
        if let Some(v) = value
            && v.trim().chars().count() > max_len
        {
            self.push(
                field,
                format!("The {} may not be greater than {} characters.", field, max_len),
            );
        }
        self
    }

    /// 编号前缀只允许字母、数字、下划线和连字符
    pub fn prefix(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value {
            let v = v.trim();
            if !v.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
                self.push(
                    field,
                    format!(
                        "The {} may only contain letters, numbers, underscores and hyphens.",
                        field
                    ),
                );
            }
        }
        self.optional(field, value, PREFIX_MAX_LEN)
    }

    pub fn push(&mut self, field: &str, msg: String) {
        self.errors.fields.entry(field.to_string()).or_default().push(msg);
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.fields.is_empty() {
            return Ok(());
        }
        let mut errors = std::mem::take(&mut self.errors);
        errors.message = "The given data was invalid.".to_string();
        Err(errors)
    }
}

/// 去除首尾空白，空串视为 None
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
