pub mod secrets_loader;

pub use secrets_loader::{load_provisioned_credential, load_secrets_file, Secrets, API_KEY_NAME};
