/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数。
/// 日志统一写到 stderr，stdout 留给界面输出。
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化全局日志
///
/// `RUST_LOG` 优先；否则默认 info，`verbose` 时为 debug。
/// 重复调用不会 panic（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "resume_optimizer=debug"
    } else {
        "resume_optimizer=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息（不输出 Key）
pub fn log_startup(config: &Config, has_provisioned_key: bool) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - {} - {}",
        config.variant.title(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🔗 服务地址: {}", config.llm_api_base_url);
    info!("🤖 模型: {}", config.llm_model_name);
    info!(
        "🔑 内置 API Key: {}",
        if has_provisioned_key { "已配置" } else { "未配置" }
    );
    info!("{}", "=".repeat(60));
}

/// 记录会话结束信息
///
/// # 参数
/// - `actions`: 触发优化的次数
/// - `rendered`: 成功展示结果的次数
pub fn log_session_end(actions: usize, rendered: usize) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📊 会话结束 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", rendered, actions);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
