//! PDF 简历读取 - 业务能力层
//!
//! 只负责"把 PDF 变成一段文本"，不做版面分析。
//! 表格、多栏排版的提取顺序完全取决于 `lopdf`。

use std::path::Path;

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("无法打开 PDF: {0}")]
    Load(String),

    #[error("第 {page} 页文字提取失败: {message}")]
    Extract { page: u32, message: String },

    #[error("读取文件失败: {0}")]
    Io(#[from] std::io::Error),
}

/// PDF 提取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedResume {
    /// 所有页面拼接后的文本，每页后面跟一个换行
    pub text: String,
    pub page_count: usize,
}

impl ExtractedResume {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// PDF 读取服务
pub struct PdfService;

impl PdfService {
    /// 从内存中的 PDF 字节提取文本
    ///
    /// 按页码顺序访问每一页；扫描件等没有文字层的 PDF 会得到空文本，
    /// 但不会报错。
    pub fn extract_text(pdf_bytes: &[u8]) -> Result<ExtractedResume, PdfError> {
        let doc = Document::load_mem(pdf_bytes).map_err(|e| PdfError::Load(e.to_string()))?;

        // get_pages 返回 BTreeMap，已按页码排序
        let pages = doc.get_pages();
        let page_count = pages.len();
        debug!("PDF 共 {} 页", page_count);

        let mut page_texts = Vec::with_capacity(page_count);
        for page_num in pages.keys() {
            let text = doc
                .extract_text(&[*page_num])
                .map_err(|e| PdfError::Extract {
                    page: *page_num,
                    message: e.to_string(),
                })?;
            page_texts.push(text);
        }

        let text = join_pages(page_texts);
        info!("✓ PDF 读取成功！共 {} 页 {} 字", page_count, text.chars().count());

        Ok(ExtractedResume { text, page_count })
    }

    /// 从磁盘读取 PDF 文件并提取文本
    pub async fn extract_file(path: &Path) -> Result<ExtractedResume, PdfError> {
        debug!("读取 PDF 文件: {}", path.display());
        let bytes = tokio::fs::read(path).await?;
        Self::extract_text(&bytes)
    }
}

/// 是否为 PDF 文件（按扩展名判断）
pub fn is_pdf_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// 按顺序拼接页面文本
///
/// 每页末尾的换行先去掉，再统一补一个 `\n`，保证页与页之间正好一个换行。
pub fn join_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref().trim_end_matches(['\r', '\n']));
        text.push('\n');
    }
    text
}
