//! 交互会话 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：解析预置 Key、创建 LLM 客户端
//! 2. **收集输入**：API Key、PDF 或粘贴的简历
//! 3. **触发流程**：每次"开始优化"创建一个 `OptimizeFlow`
//! 4. **展示结果**：把结果交给 ui 渲染
//! 5. **会话统计**：记录触发次数和结果
//!
//! Key 只保存在本结构体中，会话结束即丢弃。

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::clients::{CompletionClient, OpenAiCompletionClient};
use crate::config::Config;
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::loaders::API_KEY_NAME;
use crate::models::{
    load_provisioned_credential, Credential, CredentialSource, ResumeSource, ResumeText,
};
use crate::services::pdf_service::is_pdf_file;
use crate::services::{ExtractedResume, PdfService};
use crate::ui::{render_header, render_input_pane, render_outcome, render_toast, Prompter};
use crate::utils::logging::{log_session_end, log_startup};
use crate::workflow::{ActionOutcome, OptimizeFlow};

/// 启动参数（来自命令行）
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// 首次操作使用的 PDF 简历
    pub pdf: Option<PathBuf>,
    /// 首次操作使用的纯文本简历
    pub text: Option<PathBuf>,
    /// 只执行一次优化
    pub once: bool,
}

/// 会话统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub actions: usize,
    pub rendered: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl SessionStats {
    fn record(&mut self, outcome: &ActionOutcome) {
        self.actions += 1;
        match outcome {
            ActionOutcome::Rendered(_) => self.rendered += 1,
            ActionOutcome::Rejected(_) => self.rejected += 1,
            ActionOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// 应用主结构
pub struct App<C: CompletionClient = OpenAiCompletionClient> {
    config: Config,
    client: C,
    provisioned: Option<Credential>,
    options: LaunchOptions,
    stats: SessionStats,
}

impl App<OpenAiCompletionClient> {
    /// 初始化应用
    ///
    /// 预置 Key 读取失败不会中止启动，只是退回到手动输入。
    pub async fn initialize(config: Config, options: LaunchOptions) -> Result<Self> {
        let provisioned = match load_provisioned_credential(
            config.variant,
            std::env::var(API_KEY_NAME).ok(),
            Path::new(&config.secrets_file),
        )
        .await
        {
            Ok(credential) => credential,
            Err(e) => {
                warn!("⚠️ 读取内置 API Key 失败，将改为手动输入: {}", e);
                None
            }
        };

        log_startup(&config, provisioned.is_some());

        let client = OpenAiCompletionClient::new(&config);
        Ok(Self::with_client(config, client, provisioned, options))
    }
}

impl<C: CompletionClient> App<C> {
    /// 使用指定客户端创建应用
    pub fn with_client(
        config: Config,
        client: C,
        provisioned: Option<Credential>,
        options: LaunchOptions,
    ) -> Self {
        Self {
            config,
            client,
            provisioned,
            options,
            stats: SessionStats::default(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// 运行交互会话，直到用户退出或输入结束
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<SessionStats> {
        prompter.show(&render_header(self.config.variant))?;

        let mut credential = self.resolve_credential(prompter)?;
        let mut first_action = true;

        loop {
            let resume = self.gather_resume(prompter, first_action).await?;
            first_action = false;

            prompter.show(&render_input_pane(&resume))?;

            let mut flow = OptimizeFlow::new(&self.client, self.config.required_resume_chars());
            let outcome = flow.run(credential.as_ref(), &resume).await;
            self.stats.record(&outcome);

            prompter.show(&render_outcome(&outcome))?;

            if self.options.once {
                break;
            }

            if matches!(
                outcome,
                ActionOutcome::Rejected(ValidationError::MissingCredential)
            ) {
                credential = self.ask_credential(prompter)?;
            }

            if !prompter.confirm("再来一次？")? {
                break;
            }

            // 调用失败多半是 Key 有误，手动输入的 Key 允许当场更换
            if matches!(outcome, ActionOutcome::Failed(_)) && !is_provisioned(credential.as_ref())
            {
                credential = self.replace_credential(prompter, credential)?;
            }
        }

        log_session_end(self.stats.actions, self.stats.rendered);
        Ok(self.stats)
    }

    /// 预置 Key 优先，否则向用户索取
    fn resolve_credential<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<Credential>> {
        if let Some(credential) = &self.provisioned {
            prompter.show("✅ 已内置 API Key (朋友专享版)\n")?;
            return Ok(Some(credential.clone()));
        }
        self.ask_credential(prompter)
    }

    fn ask_credential<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<Credential>> {
        prompter.show("提示：你的 Key 仅在本次运行有效，不会被保存。\n")?;
        let line = prompter.ask_secret("请输入 API Key: ")?;
        Ok(line.map(Credential::interactive))
    }

    /// 重新输入 Key，直接回车沿用当前 Key
    fn replace_credential<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        current: Option<Credential>,
    ) -> Result<Option<Credential>> {
        prompter.show("如果是 API Key 有误，可以重新输入（直接回车沿用当前 Key）。\n")?;
        let replacement = prompter
            .ask_secret("请输入 API Key: ")?
            .map(Credential::interactive)
            .filter(|credential| !credential.is_empty());

        match replacement {
            Some(credential) => {
                info!("🔑 已更换 API Key");
                Ok(Some(credential))
            }
            None => Ok(current),
        }
    }

    /// 收集简历：命令行文件 → PDF → 粘贴
    async fn gather_resume<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
        first_action: bool,
    ) -> Result<ResumeText> {
        let pdf_allowed = self.config.variant.allows_pdf_upload();

        if first_action {
            if let Some(path) = &self.options.text {
                match read_text_file(path).await {
                    Ok(resume) => return Ok(resume),
                    Err(e) => prompter.show(&render_toast(&e.to_string()))?,
                }
            }

            if let Some(path) = &self.options.pdf {
                if pdf_allowed {
                    if let Some(resume) = load_pdf(prompter, path).await? {
                        return Ok(resume);
                    }
                } else {
                    warn!("基础版不支持 PDF 上传，忽略 {}", path.display());
                    prompter.show(&render_toast("基础版不支持 PDF 上传，请粘贴文本"))?;
                }
            }
        }

        let pdf_already_tried = first_action && self.options.pdf.is_some();
        if pdf_allowed && !pdf_already_tried {
            let answer = prompter.ask_line("上传 PDF 简历（输入文件路径，直接回车改为粘贴文本）: ")?;
            if let Some(path) = answer.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()) {
                if let Some(resume) = load_pdf(prompter, Path::new(&path)).await? {
                    return Ok(resume);
                }
            }
        }

        let prompt = if pdf_allowed {
            format!("或者直接粘贴文本（单独一行输入 {} 结束）:", crate::ui::PASTE_TERMINATOR)
        } else {
            format!("请粘贴简历内容（单独一行输入 {} 结束）:", crate::ui::PASTE_TERMINATOR)
        };
        let text = prompter.read_pasted(&prompt)?;
        Ok(ResumeText::pasted(text))
    }
}

fn is_provisioned(credential: Option<&Credential>) -> bool {
    credential.is_some_and(|c| c.source() == CredentialSource::Provisioned)
}

/// 读取 PDF，失败时提示并返回 `None`（简历保持为空，用户可改为粘贴）
async fn load_pdf<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    path: &Path,
) -> Result<Option<ResumeText>> {
    match read_pdf(path).await {
        Ok(extracted) => {
            prompter.show(&format!(
                "PDF 读取成功！共 {} 字\n",
                extracted.char_count()
            ))?;
            let file_name = file_name_of(path);
            info!("📄 已读取 {} ({} 页)", file_name, extracted.page_count);
            Ok(Some(ResumeText::new(
                extracted.text,
                ResumeSource::Pdf {
                    file_name,
                    page_count: extracted.page_count,
                },
            )))
        }
        Err(e) => {
            warn!("PDF 读取失败 ({}): {}", path.display(), e);
            prompter.show(&render_toast(&e.to_string()))?;
            Ok(None)
        }
    }
}

/// 只接受 `.pdf` 文件
async fn read_pdf(path: &Path) -> AppResult<ExtractedResume> {
    if !is_pdf_file(path) {
        return Err(AppError::not_pdf(path.display().to_string()));
    }
    Ok(PdfService::extract_file(path).await?)
}

async fn read_text_file(path: &Path) -> Result<ResumeText, AppError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
    Ok(ResumeText::new(
        text,
        ResumeSource::TextFile {
            file_name: file_name_of(path),
        },
    ))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::CompletionError;
    use crate::config::Variant;
    use async_trait::async_trait;
    use std::io::Cursor;
    use std::sync::Mutex;

    const RESUME: &str = "我叫张三，做了三年后端开发。";

    /// 记录每次调用使用的 Key；`sk-bad` 模拟鉴权失败
    #[derive(Default)]
    struct FixedClient {
        keys: Mutex<Vec<String>>,
    }

    impl FixedClient {
        fn keys(&self) -> Vec<String> {
            self.keys.lock().unwrap().clone()
        }

        fn calls(&self) -> usize {
            self.keys.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for FixedClient {
        async fn complete(
            &self,
            credential: &Credential,
            _system_instruction: &str,
            _user_text: &str,
        ) -> Result<String, CompletionError> {
            self.keys.lock().unwrap().push(credential.expose().to_string());
            if credential.expose() == "sk-bad" {
                return Err(CompletionError::NoChoices {
                    model: "401 Unauthorized".to_string(),
                });
            }
            Ok(r#"{"name":"张三"}"#.to_string())
        }
    }

    fn app(variant: Variant, provisioned: Option<Credential>, options: LaunchOptions) -> App<FixedClient> {
        let config = Config {
            variant,
            ..Config::default()
        };
        App::with_client(config, FixedClient::default(), provisioned, options)
    }

    fn run_with_input(app: &mut App<FixedClient>, input: &str) -> (SessionStats, String) {
        let mut prompter = Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let stats = tokio_test::block_on(app.run(&mut prompter)).unwrap();
        let (_, out) = prompter.into_inner();
        (stats, String::from_utf8(out).unwrap())
    }

    fn once() -> LaunchOptions {
        LaunchOptions {
            once: true,
            ..LaunchOptions::default()
        }
    }

    #[test]
    fn test_missing_key_then_retry() {
        let mut app = app(Variant::Basic, None, LaunchOptions::default());
        let input = format!("\n{r}\nEND\nsk-1\ny\n{r}\nEND\n\n", r = RESUME);

        let (stats, out) = run_with_input(&mut app, &input);

        assert_eq!(stats.actions, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.rendered, 1);
        assert_eq!(app.client.calls(), 2);
        assert!(out.contains("❌ 请先填写 API Key"));
        assert!(out.contains("姓名: 张三"));
    }

    #[test]
    fn test_failed_call_lets_user_replace_key() {
        let mut app = app(Variant::Basic, None, LaunchOptions::default());
        let input = format!("sk-bad\n{r}\nEND\ny\nsk-good\n{r}\nEND\n", r = RESUME);

        let (stats, out) = run_with_input(&mut app, &input);

        assert_eq!(stats.actions, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.rendered, 1);
        // 失败时只发出了提取请求，换 Key 后两次调用都用新 Key
        assert_eq!(app.client.keys(), ["sk-bad", "sk-good", "sk-good"]);
        assert!(out.contains("发生错误：LLM 返回结果为空 (模型: 401 Unauthorized)"));
        assert!(out.contains("直接回车沿用当前 Key"));
        assert!(!out.contains("sk-good"));
    }

    #[test]
    fn test_blank_answer_keeps_current_key() {
        let mut app = app(Variant::Basic, None, LaunchOptions::default());
        let input = format!("sk-bad\n{r}\nEND\ny\n\n{r}\nEND\n", r = RESUME);

        let (stats, _) = run_with_input(&mut app, &input);

        assert_eq!(stats.failed, 2);
        assert_eq!(app.client.keys(), ["sk-bad", "sk-bad"]);
    }

    #[test]
    fn test_provisioned_key_is_not_offered_for_replacement() {
        let provisioned = Some(Credential::provisioned("sk-bad"));
        let mut app = app(Variant::Pro, provisioned, LaunchOptions::default());
        // 不上传 PDF → 粘贴 → 失败 → 再来一次 → 不上传 PDF → 粘贴
        let input = format!("\n{r}\nEND\ny\n\n{r}\nEND\n", r = RESUME);

        let (stats, out) = run_with_input(&mut app, &input);

        assert_eq!(stats.failed, 2);
        assert!(!out.contains("请输入 API Key"));
        assert_eq!(app.client.keys(), ["sk-bad", "sk-bad"]);
    }

    #[test]
    fn test_pro_uses_provisioned_key_and_rejects_short_resume() {
        let mut app = app(Variant::Pro, Some(Credential::provisioned("sk-p")), once());
        // 不上传 PDF，粘贴过短的文本
        let (stats, out) = run_with_input(&mut app, "\n太短\nEND\n");

        assert!(out.contains("✅ 已内置 API Key"));
        assert!(!out.contains("请输入 API Key"));
        assert_eq!(stats.rejected, 1);
        assert_eq!(app.client.calls(), 0);
    }

    #[test]
    fn test_bad_pdf_falls_back_to_paste() {
        let mut bad_pdf = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        bad_pdf.write_all(b"not a pdf").unwrap();
        let options = LaunchOptions {
            pdf: Some(bad_pdf.path().to_path_buf()),
            ..once()
        };
        let mut app = app(Variant::Pro, Some(Credential::provisioned("sk-p")), options);

        let (stats, out) = run_with_input(&mut app, &format!("{}\nEND\n", RESUME));

        assert!(out.contains("❌ PDF 解析失败"));
        assert_eq!(stats.rendered, 1);
        assert_eq!(app.client.calls(), 2);
    }

    #[test]
    fn test_non_pdf_path_is_rejected_before_reading() {
        let mut notes = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        notes.write_all(RESUME.as_bytes()).unwrap();
        let mut app = app(Variant::Pro, Some(Credential::provisioned("sk-p")), once());
        let input = format!("{}\n{}\nEND\n", notes.path().display(), RESUME);

        let (stats, out) = run_with_input(&mut app, &input);

        assert!(out.contains("只支持 PDF 文件"));
        assert!(!out.contains("来源: PDF"));
        assert!(out.contains("来源: 粘贴文本"));
        assert_eq!(stats.rendered, 1);
    }

    #[test]
    fn test_text_file_option() {
        let mut resume = tempfile::NamedTempFile::new().unwrap();
        resume.write_all(RESUME.as_bytes()).unwrap();
        let options = LaunchOptions {
            text: Some(resume.path().to_path_buf()),
            ..once()
        };
        let mut app = app(Variant::Basic, None, options);

        let (stats, out) = run_with_input(&mut app, "sk-1\n");

        assert!(out.contains("来源: 文本文件"));
        assert_eq!(stats.rendered, 1);
    }
}
