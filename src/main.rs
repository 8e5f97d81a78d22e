use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use resume_optimizer::ui::Prompter;
use resume_optimizer::utils::logging;
use resume_optimizer::{App, Config, LaunchOptions, Variant};

#[derive(Parser)]
#[command(name = "resume-optimizer")]
#[command(about = "AI 简历优化助手：结构化提取 + 毒舌点评")]
struct Cli {
    /// 使用 Pro 版（内置 Key、PDF 上传）
    #[arg(long)]
    pro: bool,

    /// PDF 简历路径（仅 Pro 版）
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// 纯文本简历路径
    #[arg(long)]
    text: Option<PathBuf>,

    /// 只执行一次优化
    #[arg(long)]
    once: bool,

    /// 显示详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置，命令行参数覆盖环境变量
    let mut config = Config::from_env();
    if cli.pro {
        config.variant = Variant::Pro;
    }
    config.verbose_logging |= cli.verbose;

    // 初始化日志
    logging::init(config.verbose_logging);

    let options = LaunchOptions {
        pdf: cli.pdf,
        text: cli.text,
        once: cli.once,
    };

    // 初始化并运行应用
    let mut app = App::initialize(config, options).await?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout()).hide_secrets(interactive);
    app.run(&mut prompter).await?;

    Ok(())
}
