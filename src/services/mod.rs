pub mod analysis_service;
pub mod pdf_service;

pub use analysis_service::{critique, extract_structured};
pub use pdf_service::{ExtractedResume, PdfError, PdfService};
