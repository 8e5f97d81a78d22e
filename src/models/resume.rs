//! 简历文本

/// 简历来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    /// 直接粘贴
    Pasted,
    /// 纯文本文件
    TextFile { file_name: String },
    /// 上传的 PDF
    Pdf { file_name: String, page_count: usize },
}

/// 一次优化操作使用的简历内容
///
/// 不做任何长度或编码上的规整，长度按字符数计算。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeText {
    text: String,
    source: ResumeSource,
}

impl ResumeText {
    pub fn new(text: impl Into<String>, source: ResumeSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    pub fn pasted(text: impl Into<String>) -> Self {
        Self::new(text, ResumeSource::Pasted)
    }

    pub fn empty() -> Self {
        Self::pasted(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &ResumeSource {
        &self.source
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_counts_scalars_not_bytes() {
        let resume = ResumeText::pasted("我叫张三");
        assert_eq!(resume.char_count(), 4);
        assert!(resume.as_str().len() > 4);
    }
}
