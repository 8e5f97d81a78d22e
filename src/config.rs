/// 程序配置
///
/// 所有字段都有默认值，可通过环境变量覆盖，命令行参数再覆盖环境变量。
/// 预置的 API Key 不在这里保存，由 `models::loaders` 在启动时单独解析。
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// 默认的 LLM 服务地址
pub const DEFAULT_API_BASE_URL: &str = "https://llmapi.paratera.com";
/// 默认模型
pub const DEFAULT_MODEL_NAME: &str = "Qwen3-235B-A22B-Instruct-2507";
/// 采样温度（两次调用固定使用）
pub const TEMPERATURE: f32 = 0.7;
/// Pro 版简历最少字符数
pub const DEFAULT_MIN_RESUME_CHARS: usize = 10;

/// 应用版本
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Variant {
    /// 基础版：手动输入 Key，只能粘贴文本
    #[default]
    Basic,
    /// Pro 版：支持预置 Key 和 PDF 上传
    Pro,
}

impl Variant {
    /// 是否允许使用预置的 API Key
    pub fn allows_provisioned_credential(self) -> bool {
        matches!(self, Variant::Pro)
    }

    /// 是否允许上传 PDF
    pub fn allows_pdf_upload(self) -> bool {
        matches!(self, Variant::Pro)
    }

    pub fn title(self) -> &'static str {
        match self {
            Variant::Basic => "🚀 AI 简历优化助手",
            Variant::Pro => "🚀 AI 简历优化助手 Pro",
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "" => Ok(Variant::Basic),
            "pro" => Ok(Variant::Pro),
            other => Err(ConfigError::EnvVarParseFailed {
                var_name: "APP_VARIANT".to_string(),
                value: other.to_string(),
                expected_type: "basic | pro".to_string(),
            }),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Basic => write!(f, "basic"),
            Variant::Pro => write!(f, "pro"),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 应用版本
    pub variant: Variant,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 预置密钥文件（TOML）
    pub secrets_file: String,
    /// Pro 版简历最少字符数
    pub min_resume_chars: usize,
    // --- LLM 配置 ---
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Basic,
            verbose_logging: false,
            secrets_file: "secrets.toml".to_string(),
            min_resume_chars: DEFAULT_MIN_RESUME_CHARS,
            llm_api_base_url: DEFAULT_API_BASE_URL.to_string(),
            llm_model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，解析失败的值退回默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 测试中用闭包代替真实环境变量，避免修改进程级状态。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Self {
            variant: lookup("APP_VARIANT").and_then(|v| v.parse().ok()).unwrap_or(default.variant),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            secrets_file: lookup("SECRETS_FILE").unwrap_or(default.secrets_file),
            min_resume_chars: lookup("MIN_RESUME_CHARS").and_then(|v| v.parse().ok()).unwrap_or(default.min_resume_chars),
            llm_api_base_url: lookup("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: lookup("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 当前版本要求的简历最少字符数
    ///
    /// 基础版只要求非空。
    pub fn required_resume_chars(&self) -> usize {
        match self.variant {
            Variant::Basic => 1,
            Variant::Pro => self.min_resume_chars.max(1),
        }
    }
}
