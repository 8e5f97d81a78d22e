//! 简历优化流程 - 流程层
//!
//! 核心职责：定义"一次优化"的完整处理流程
//!
//! 流程顺序：
//! 1. 校验输入（失败 → Rejected，不发请求）
//! 2. 结构化提取（失败 → Failed）
//! 3. 毒舌点评（失败 → Failed）
//! 4. 解析提取结果（失败不报错，保留原文）

use std::fmt;

use tracing::{error, info, warn};

use crate::clients::CompletionClient;
use crate::error::ValidationError;
use crate::models::{Credential, Extraction, ResumeText, StructuredInfo};
use crate::services::{critique, extract_structured};
use crate::workflow::validation::validate_input;

/// 正在进行的 LLM 调用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Extraction,
    Critique,
}

/// 一次优化操作经历的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    Calling(CallKind),
    Parsing,
    Rendered,
    Rejected,
    Failed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::Idle => write!(f, "Idle"),
            FlowState::Validating => write!(f, "Validating"),
            FlowState::Calling(CallKind::Extraction) => write!(f, "Calling(extraction)"),
            FlowState::Calling(CallKind::Critique) => write!(f, "Calling(critique)"),
            FlowState::Parsing => write!(f, "Parsing"),
            FlowState::Rendered => write!(f, "Rendered"),
            FlowState::Rejected => write!(f, "Rejected"),
            FlowState::Failed => write!(f, "Failed"),
        }
    }
}

/// 两次调用的结果
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeReport {
    pub extraction: Extraction,
    pub critique: String,
}

/// 一次优化操作的最终结果
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// 输入不合法，没有发出请求
    Rejected(ValidationError),
    /// 调用失败，不展示任何部分结果
    Failed(String),
    /// 成功
    Rendered(OptimizeReport),
}

impl ActionOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, ActionOutcome::Rendered(_))
    }
}

/// 优化流程
///
/// - 只依赖 `CompletionClient` 能力，不关心界面
/// - 两次调用严格串行，第一次失败时不发第二次
/// - 记录状态轨迹，便于日志和测试
pub struct OptimizeFlow<'a, C: CompletionClient + ?Sized> {
    client: &'a C,
    min_resume_chars: usize,
    trace: Vec<FlowState>,
}

impl<'a, C: CompletionClient + ?Sized> OptimizeFlow<'a, C> {
    pub fn new(client: &'a C, min_resume_chars: usize) -> Self {
        Self {
            client,
            min_resume_chars,
            trace: vec![FlowState::Idle],
        }
    }

    /// 本次操作经历的状态
    pub fn trace(&self) -> &[FlowState] {
        &self.trace
    }

    pub fn state(&self) -> FlowState {
        self.trace.last().copied().unwrap_or(FlowState::Idle)
    }

    pub async fn run(
        &mut self,
        credential: Option<&Credential>,
        resume: &ResumeText,
    ) -> ActionOutcome {
        self.enter(FlowState::Validating);
        let credential = match validate_input(credential, resume, self.min_resume_chars) {
            Ok(credential) => credential,
            Err(e) => {
                warn!("❌ 输入校验失败: {}", e);
                self.enter(FlowState::Rejected);
                return ActionOutcome::Rejected(e);
            }
        };

        info!("🧠 AI 正在大脑风暴中... (简历 {} 字)", resume.char_count());

        // ========== 调用 1: 结构化提取 ==========
        self.enter(FlowState::Calling(CallKind::Extraction));
        let extraction_reply =
            match extract_structured(self.client, credential, resume.as_str()).await {
                Ok(reply) => reply,
                Err(e) => return self.fail(e),
            };

        // ========== 调用 2: 毒舌点评 ==========
        self.enter(FlowState::Calling(CallKind::Critique));
        let critique_reply = match critique(self.client, credential, resume.as_str()).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(e),
        };

        // ========== 解析 ==========
        self.enter(FlowState::Parsing);
        let extraction = StructuredInfo::parse_reply(&extraction_reply);
        if extraction.is_fallback() {
            warn!("⚠️ JSON 解析失败，模型可能没听话，将直接显示原文");
        } else {
            info!("✅ 解析成功！");
        }

        self.enter(FlowState::Rendered);
        ActionOutcome::Rendered(OptimizeReport {
            extraction,
            critique: critique_reply,
        })
    }

    fn enter(&mut self, state: FlowState) {
        tracing::debug!("状态: {} → {}", self.state(), state);
        self.trace.push(state);
    }

    fn fail(&mut self, err: impl std::error::Error) -> ActionOutcome {
        error!("❌ {} 阶段失败: {}", self.state(), err);
        self.enter(FlowState::Failed);
        ActionOutcome::Failed(err.to_string())
    }
}
