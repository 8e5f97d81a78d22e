//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次交互会话的调度，是整个系统的"指挥中心"。
//!
//! ### `session` - 交互会话
//! - 管理应用生命周期（初始化、运行、统计）
//! - 持有 API Key 和 LLM 客户端
//! - 收集输入，每次"开始优化"创建一个 `OptimizeFlow`
//!
//! ## 层次关系
//!
//! ```text
//! session (会话，循环处理多次操作)
//!     ↓
//! workflow::OptimizeFlow (处理一次优化)
//!     ↓
//! services (能力层：analysis / pdf)
//!     ↓
//! clients (LLM API)
//! ```

pub mod session;

pub use session::{App, LaunchOptions, SessionStats};
