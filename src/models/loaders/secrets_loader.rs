use crate::config::Variant;
use crate::error::{AppError, AppResult};
use crate::models::credential::Credential;
use serde::Deserialize;
use std::path::Path;

/// 预置 Key 使用的环境变量 / 密钥文件字段名
pub const API_KEY_NAME: &str = "OPENAI_API_KEY";

/// 密钥文件内容
///
/// ```toml
/// OPENAI_API_KEY = "sk-xxxx"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Secrets {
    #[serde(rename = "OPENAI_API_KEY")]
    pub openai_api_key: Option<String>,
}

/// 从 TOML 文件加载密钥，文件不存在时返回 `None`
pub async fn load_secrets_file(path: &Path) -> AppResult<Option<Secrets>> {
    if !tokio::fs::try_exists(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?
    {
        tracing::debug!("密钥文件不存在: {}", path.display());
        return Ok(None);
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let secrets: Secrets = toml::from_str(&content)
        .map_err(|e| AppError::toml_parse_failed(path.display().to_string(), e))?;

    Ok(Some(secrets))
}

/// 解析启动时预置的 Key
///
/// 只有 Pro 版使用预置 Key。优先读取环境变量，其次读取密钥文件；
/// 都没有时返回 `None`，由界面向用户索取。
pub async fn load_provisioned_credential(
    variant: Variant,
    env_value: Option<String>,
    secrets_path: &Path,
) -> AppResult<Option<Credential>> {
    if !variant.allows_provisioned_credential() {
        return Ok(None);
    }

    if let Some(key) = env_value.filter(|v| !v.trim().is_empty()) {
        tracing::info!("✅ 已从环境变量读取内置 API Key");
        return Ok(Some(Credential::provisioned(key)));
    }

    let from_file = load_secrets_file(secrets_path)
        .await?
        .and_then(|secrets| secrets.openai_api_key)
        .filter(|v| !v.trim().is_empty())
        .map(Credential::provisioned);

    if from_file.is_some() {
        tracing::info!("✅ 已从密钥文件读取内置 API Key");
    }

    Ok(from_file)
}
