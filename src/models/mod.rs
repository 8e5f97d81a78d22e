pub mod credential;
pub mod loaders;
pub mod resume;
pub mod structured_info;

pub use credential::{Credential, CredentialSource};
pub use loaders::{load_provisioned_credential, load_secrets_file, Secrets};
pub use resume::{ResumeSource, ResumeText};
pub use structured_info::{Extraction, StructuredInfo, UNKNOWN};
