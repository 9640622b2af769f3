use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("home directory not found (cannot expand '~')")]
    HomeDirNotFound,

    #[error(
        "credential file not found: {}\n\nHint:\n  • pass --edgerc <PATH> or set EDGERC\n  • create an API client in Control Center and save it as ~/.edgerc",
        .0.display()
    )]
    CredentialFileNotFound(PathBuf),

    #[error("section [{section}] not found in {}", .path.display())]
    SectionNotFound { section: String, path: PathBuf },

    #[error("section [{section}] is missing required field '{field}'")]
    MissingField {
        section: String,
        field: &'static str,
    },

    #[error("failed to parse credential file: {0}")]
    Parse(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
