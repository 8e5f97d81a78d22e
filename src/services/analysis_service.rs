//! 简历分析 - 业务能力层
//!
//! 两个互相独立的请求/响应函数，各自只调用一次 LLM：
//! - `extract_structured`：结构化信息提取（JSON）
//! - `critique`：毒舌点评（Markdown）
//!
//! 不关心调用顺序，也不共享任何状态，由 workflow 层编排。

use tracing::debug;

use crate::clients::{CompletionClient, CompletionError};
use crate::models::Credential;

/// 结构化提取提示词
pub const EXTRACTION_PROMPT: &str =
    "提取简历关键信息，严格输出 JSON 格式。包含字段：name, education, skills, years。";

/// 毒舌点评提示词
pub const CRITIQUE_PROMPT: &str =
    "你是个尖酸刻薄且毒舌的 HR。指出 3 个缺点并给出建议。使用 Markdown 格式。";

/// 调用 LLM 提取结构化信息，返回模型原文
///
/// 原文的解析交给 [`StructuredInfo::parse_reply`]，这里不做任何处理。
///
/// [`StructuredInfo::parse_reply`]: crate::models::StructuredInfo::parse_reply
pub async fn extract_structured<C>(
    client: &C,
    credential: &Credential,
    resume_text: &str,
) -> Result<String, CompletionError>
where
    C: CompletionClient + ?Sized,
{
    debug!("📋 请求结构化信息提取");
    client
        .complete(credential, EXTRACTION_PROMPT, resume_text)
        .await
}

/// 调用 LLM 生成点评，返回 Markdown 原文
pub async fn critique<C>(
    client: &C,
    credential: &Credential,
    resume_text: &str,
) -> Result<String, CompletionError>
where
    C: CompletionClient + ?Sized,
{
    debug!("🌶️ 请求毒舌点评");
    client.complete(credential, CRITIQUE_PROMPT, resume_text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 记录收到的 system 提示词，原样回显 user 文本
    #[derive(Default)]
    struct EchoClient {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionClient for EchoClient {
        async fn complete(
            &self,
            _credential: &Credential,
            system_instruction: &str,
            user_text: &str,
        ) -> Result<String, CompletionError> {
            self.prompts
                .lock()
                .unwrap()
                .push(system_instruction.to_string());
            Ok(user_text.to_string())
        }
    }

    #[tokio::test]
    async fn test_each_function_uses_its_own_prompt() {
        let client = EchoClient::default();
        let credential = Credential::interactive("sk-test");

        let reply = extract_structured(&client, &credential, "简历").await.unwrap();
        assert_eq!(reply, "简历");
        let reply = critique(&client, &credential, "简历").await.unwrap();
        assert_eq!(reply, "简历");

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), [EXTRACTION_PROMPT, CRITIQUE_PROMPT]);
    }

    #[test]
    fn test_extraction_prompt_names_all_keys() {
        for key in ["name", "education", "skills", "years"] {
            assert!(EXTRACTION_PROMPT.contains(key));
        }
        assert!(EXTRACTION_PROMPT.contains("JSON"));
        assert!(CRITIQUE_PROMPT.contains("Markdown"));
    }
}
