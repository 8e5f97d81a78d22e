//! 终端渲染
//!
//! 只把数据变成文本，不做任何 IO。左栏是输入，右栏是分析结果。

use crate::config::Variant;
use crate::models::{Extraction, ResumeSource, ResumeText, StructuredInfo};
use crate::utils::truncate_text;
use crate::workflow::{ActionOutcome, OptimizeReport};

const RULE_WIDTH: usize = 60;
const PREVIEW_CHARS: usize = 300;

/// 页面标题
pub fn render_header(variant: Variant) -> String {
    format!("{}\n{}\n", variant.title(), "=".repeat(RULE_WIDTH))
}

/// 左栏：输入概览
pub fn render_input_pane(resume: &ResumeText) -> String {
    let mut out = String::new();
    out.push_str("📝 原始简历\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    match resume.source() {
        ResumeSource::Pasted => out.push_str("来源: 粘贴文本\n"),
        ResumeSource::TextFile { file_name } => {
            out.push_str(&format!("来源: 文本文件 {}\n", file_name))
        }
        ResumeSource::Pdf {
            file_name,
            page_count,
        } => out.push_str(&format!("来源: PDF {}（{} 页）\n", file_name, page_count)),
    }
    out.push_str(&format!("字数: {}\n", resume.char_count()));
    if !resume.is_empty() {
        out.push_str(&truncate_text(resume.as_str(), PREVIEW_CHARS));
        out.push('\n');
    }
    out
}

/// 右栏：一次操作的结果
pub fn render_outcome(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Rejected(e) => render_toast(&e.to_string()),
        ActionOutcome::Failed(message) => format!("发生错误：{}\n", message),
        ActionOutcome::Rendered(report) => render_report(report),
    }
}

/// 校验类提示
pub fn render_toast(message: &str) -> String {
    format!("❌ {}\n", message)
}

/// 分析结果：结构化信息 + 点评
pub fn render_report(report: &OptimizeReport) -> String {
    let mut out = String::new();
    out.push_str("🧠 AI 分析结果\n");
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    match &report.extraction {
        Extraction::Structured(info) => out.push_str(&render_structured(info)),
        Extraction::RawFallback(raw) => {
            out.push_str("⚠️ JSON 解析失败，模型可能没听话，直接显示原文：\n");
            out.push_str("```\n");
            out.push_str(raw);
            out.push_str("\n```\n");
        }
    }

    out.push_str("---\n");
    out.push_str("### 🌶️ 毒舌点评\n");
    out.push_str(&report.critique);
    out.push('\n');
    out
}

fn render_structured(info: &StructuredInfo) -> String {
    let skills = serde_json::to_string_pretty(&info.skills).unwrap_or_default();
    format!(
        "✅ 解析成功！\n\
         姓名: {}  |  工作年限: {}  |  学历: {}\n\
         **技能栈：**\n{}\n",
        info.name, info.years, info.education, skills
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::UNKNOWN;

    fn report(extraction: Extraction) -> OptimizeReport {
        OptimizeReport {
            extraction,
            critique: "1. **没有量化成果**".to_string(),
        }
    }

    #[test]
    fn test_structured_report_shows_fields_and_skills() {
        let extraction = StructuredInfo::parse_reply(
            r#"{"name":"Zhang San","education":"Bachelor","skills":["Python","Go"],"years":3}"#,
        );
        let text = render_report(&report(extraction));

        assert!(text.contains("姓名: Zhang San"));
        assert!(text.contains("工作年限: 3"));
        assert!(text.contains("学历: Bachelor"));
        assert!(text.contains("\"Python\""));
        assert!(!text.contains("JSON 解析失败"));
        assert!(text.ends_with("1. **没有量化成果**\n"));
    }

    #[test]
    fn test_defaults_are_rendered() {
        let text = render_report(&report(StructuredInfo::parse_reply("{}")));
        assert!(text.contains(&format!("姓名: {}", UNKNOWN)));
        assert!(text.contains("[]"));
    }

    #[test]
    fn test_fallback_shows_raw_with_warning() {
        let text = render_report(&report(Extraction::RawFallback(
            "Sorry, I cannot comply.".to_string(),
        )));
        assert!(text.contains("⚠️ JSON 解析失败"));
        assert!(text.contains("Sorry, I cannot comply."));
        assert!(text.contains("🌶️ 毒舌点评"));
    }

    #[test]
    fn test_outcome_messages() {
        let rejected = ActionOutcome::Rejected(ValidationError::MissingCredential);
        assert_eq!(render_outcome(&rejected), "❌ 请先填写 API Key\n");

        let failed = ActionOutcome::Failed("timeout".to_string());
        assert_eq!(render_outcome(&failed), "发生错误：timeout\n");
    }

    #[test]
    fn test_input_pane_mentions_pdf_pages() {
        let resume = ResumeText::new(
            "Page1 text\nPage2 text\n",
            ResumeSource::Pdf {
                file_name: "cv.pdf".to_string(),
                page_count: 2,
            },
        );
        let text = render_input_pane(&resume);
        assert!(text.contains("cv.pdf（2 页）"));
        assert!(text.contains("字数: 22"));
    }
}
