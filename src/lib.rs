//! # Resume Optimizer
//!
//! AI 简历优化助手：把简历（粘贴文本或 PDF）发给兼容 OpenAI 的 LLM 服务两次，
//! 分别得到结构化信息和毒舌点评。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - `CompletionClient` trait 与基于 async-openai 的实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `analysis_service` - 结构化提取 / 毒舌点评，各一次调用
//! - `PdfService` - PDF 转文本
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次优化"的完整流程
//! - `OptimizeFlow` - 校验 → 提取 → 点评 → 解析
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session` - 交互会话，持有 Key 和客户端
//!
//! `ui/` 负责终端输入和渲染，`models/` 为数据类型，`config` / `error` /
//! `utils` 为公共设施。

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod ui;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{CompletionClient, CompletionError, OpenAiCompletionClient};
pub use config::{Config, Variant};
pub use error::{AppError, AppResult, ValidationError};
pub use models::{Credential, Extraction, ResumeText, StructuredInfo};
pub use orchestrator::{App, LaunchOptions, SessionStats};
pub use services::{PdfError, PdfService};
pub use workflow::{ActionOutcome, FlowState, OptimizeFlow, OptimizeReport};
