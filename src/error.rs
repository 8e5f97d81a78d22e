use std::fmt;

use crate::services::PdfError;

/// 应用程序错误类型
///
/// 只覆盖会话外围的文件读取；LLM 调用和输入校验的错误由 workflow 层
/// 直接转成 `ActionOutcome`。
#[derive(Debug)]
pub enum AppError {
    /// PDF 解析失败
    Pdf(PdfError),
    /// 文件操作错误
    File(FileError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Pdf(e) => write!(f, "PDF 解析失败: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Pdf(e) => Some(e),
            AppError::File(e) => Some(e),
        }
    }
}

/// 输入校验错误
///
/// 触发时不会发出任何网络请求。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 未提供 API Key
    MissingCredential,
    /// 简历内容为空
    EmptyResume,
    /// 简历内容太短
    ResumeTooShort { len: usize, min: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingCredential => write!(f, "请先填写 API Key"),
            ValidationError::EmptyResume => write!(f, "请填写简历内容"),
            ValidationError::ResumeTooShort { len, min } => write!(
                f,
                "简历内容太少了（{} 字，至少 {} 字），请上传文件或粘贴文本",
                len, min
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 不是 PDF 文件
    NotPdf { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotPdf { path } => write!(f, "只支持 PDF 文件: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            FileError::NotPdf { .. } => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        AppError::Pdf(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建 TOML 解析错误
    pub fn toml_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建"不是 PDF"错误
    pub fn not_pdf(path: impl Into<String>) -> Self {
        AppError::File(FileError::NotPdf { path: path.into() })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
