//! API Key 封装
//!
//! Key 只保存在内存里，`Debug` / `Display` 都不会输出原文。

use std::fmt;

/// API Key 来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// 部署时预置（环境变量或密钥文件）
    Provisioned,
    /// 用户在本次会话中输入
    Interactive,
}

/// 调用 LLM 服务所需的 API Key
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    secret: String,
    source: CredentialSource,
}

impl Credential {
    pub fn new(secret: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            secret: secret.into().trim().to_string(),
            source,
        }
    }

    /// 用户输入的 Key
    pub fn interactive(secret: impl Into<String>) -> Self {
        Self::new(secret, CredentialSource::Interactive)
    }

    /// 预置的 Key
    pub fn provisioned(secret: impl Into<String>) -> Self {
        Self::new(secret, CredentialSource::Provisioned)
    }

    /// 原始 Key，仅供客户端构造请求头使用
    pub fn expose(&self) -> &str {
        &self.secret
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("secret", &"***")
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "<empty>")
        } else {
            write!(f, "***")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_are_redacted() {
        let credential = Credential::interactive("sk-very-secret");
        assert!(!format!("{:?}", credential).contains("sk-very-secret"));
        assert!(!credential.to_string().contains("sk-very-secret"));
        assert_eq!(credential.expose(), "sk-very-secret");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(Credential::interactive("   \n").is_empty());
        assert!(!Credential::provisioned(" sk-1 ").is_empty());
        assert_eq!(Credential::provisioned(" sk-1 ").expose(), "sk-1");
    }
}
