/// LLM API 客户端
///
/// 封装所有与 LLM API 相关的调用逻辑。一次调用只发送两条消息
/// （system + user），温度固定，不重试。
///
/// ## 技术栈
/// - 使用 `async-openai` crate 进行 API 调用
/// - 兼容 OpenAI API 的服务（通过自定义 api_base）
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, TEMPERATURE};
use crate::models::Credential;

/// LLM 调用错误
///
/// 网络、鉴权、限流、响应格式错误统一归为一类返回给调用方。
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("LLM API 调用失败 (模型: {model}): {source}")]
    Request {
        model: String,
        #[source]
        source: OpenAIError,
    },

    #[error("LLM 返回结果为空 (模型: {model})")]
    NoChoices { model: String },

    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 聊天补全能力
///
/// 编排层只依赖这个 trait，测试中可以替换为桩实现。
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// 发送 system + user 两条消息，返回第一个 choice 的文本（原样，不做裁剪）
    async fn complete(
        &self,
        credential: &Credential,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<String, CompletionError>;
}

/// 基于 async-openai 的 LLM 客户端
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    api_base_url: String,
    model_name: String,
}

impl OpenAiCompletionClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        Self {
            api_base_url: config.llm_api_base_url.clone(),
            model_name: config.llm_model_name.clone(),
        }
    }

    fn request_error(&self, source: OpenAIError) -> CompletionError {
        CompletionError::Request {
            model: self.model_name.clone(),
            source,
        }
    }

    /// 构建请求消息
    fn build_messages(
        &self,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<Vec<ChatCompletionRequestMessage>, CompletionError> {
        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_instruction)
            .build()
            .map_err(|e| self.request_error(e))?;

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_text)
            .build()
            .map_err(|e| self.request_error(e))?;

        Ok(vec![
            ChatCompletionRequestMessage::System(system_msg),
            ChatCompletionRequestMessage::User(user_msg),
        ])
    }

    /// 取第一个 choice 的文本，首尾空白保留
    fn first_choice_text(
        &self,
        response: CreateChatCompletionResponse,
    ) -> Result<String, CompletionError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::NoChoices {
                model: self.model_name.clone(),
            })?;

        choice
            .message
            .content
            .ok_or_else(|| CompletionError::EmptyContent {
                model: self.model_name.clone(),
            })
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(
        &self,
        credential: &Credential,
        system_instruction: &str,
        user_text: &str,
    ) -> Result<String, CompletionError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_text.chars().count());

        // Key 每次会话可能不同，按调用构造客户端
        let openai_config = OpenAIConfig::new()
            .with_api_key(credential.expose())
            .with_api_base(&self.api_base_url);
        let client = Client::with_config(openai_config);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(self.build_messages(system_instruction, user_text)?)
            .temperature(TEMPERATURE)
            .build()
            .map_err(|e| self.request_error(e))?;

        let response = client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            self.request_error(e)
        })?;

        debug!("LLM API 调用成功");
        self.first_choice_text(response)
    }
}
