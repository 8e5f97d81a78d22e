//! 输入校验
//!
//! 校验失败时不发出任何网络请求。

use crate::error::ValidationError;
use crate::models::{Credential, ResumeText};

/// 校验一次优化操作的输入
///
/// `min_chars` 为 1 时只要求非空（基础版），Pro 版传入最少字符数。
/// 通过时返回可用的 Key。
pub fn validate_input<'c>(
    credential: Option<&'c Credential>,
    resume: &ResumeText,
    min_chars: usize,
) -> Result<&'c Credential, ValidationError> {
    let credential = match credential {
        Some(c) if !c.is_empty() => c,
        _ => return Err(ValidationError::MissingCredential),
    };

    if resume.is_empty() {
        return Err(ValidationError::EmptyResume);
    }

    let len = resume.char_count();
    if len < min_chars {
        return Err(ValidationError::ResumeTooShort { len, min: min_chars });
    }

    Ok(credential)
}
