//! EdgeGrid credential loading for edgeflow
//!
//! Credentials live in an INI style `.edgerc` file with one section per API
//! client:
//!
//! ```ini
//! [default]
//! host = akab-xxxxxxxxxxxxxxxx-xxxxxxxxxxxxxxxx.luna.akamaiapis.net
//! client_token = akab-xxxxxxxxxxxxxxxx-xxxxxxxxxxxxxxxx
//! client_secret = xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx=
//! access_token = akab-xxxxxxxxxxxxxxxx-xxxxxxxxxxxxxxxx
//! ```

pub mod error;

pub use error::*;

use config::{Config, File, FileFormat, Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Credential file used when none is given
pub const DEFAULT_EDGERC: &str = "~/.edgerc";

/// Section used when none is given
pub const DEFAULT_SECTION: &str = "default";

/// Expand a leading `~/` to the user's home directory
pub fn expand_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    match path.to_str().and_then(|p| p.strip_prefix("~/")) {
        Some(rest) => {
            let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
            Ok(home.join(rest))
        }
        None => Ok(path.to_path_buf()),
    }
}

/// `~/.edgerc`, expanded
pub fn default_edgerc_path() -> Result<PathBuf> {
    expand_path(DEFAULT_EDGERC)
}

/// One API client section of an `.edgerc` file
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub client_token: String,
    pub client_secret: String,
    pub access_token: String,
}

impl Credentials {
    /// Load `section` from the credential file at `path` (`~/` is expanded)
    pub fn load(path: impl AsRef<Path>, section: &str) -> Result<Self> {
        let path = expand_path(path)?;
        if !path.is_file() {
            return Err(ConfigError::CredentialFileNotFound(path));
        }

        let settings = Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Ini))
            .build()?;

        let sections: Map<String, Value> = settings.try_deserialize()?;
        let table = section_table(sections, &section.to_lowercase()).ok_or_else(|| {
            ConfigError::SectionNotFound {
                section: section.to_string(),
                path: path.clone(),
            }
        })?;

        let required = |field: &'static str| -> Result<String> {
            let value = match table.get(field) {
                Some(value) => value.clone().into_string()?,
                None => String::new(),
            };
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    section: section.to_string(),
                    field,
                });
            }
            Ok(value.trim().to_string())
        };

        let credentials = Self {
            host: required("host")?,
            client_token: required("client_token")?,
            client_secret: required("client_secret")?,
            access_token: required("access_token")?,
        };

        tracing::debug!(
            "Loaded credentials [{}] from {} (host: {})",
            section,
            path.display(),
            credentials.host
        );

        Ok(credentials)
    }

    /// Base URL for API calls
    ///
    /// A host that already carries a scheme is used as-is; anything else is
    /// reached over HTTPS.
    pub fn base_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("https://") || host.starts_with("http://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }
}

/// Table of the INI section `name`
///
/// The config crate stores sections lowercased and splits dotted names such
/// as `[papi.prod]` into nested tables, so both layouts are accepted.
fn section_table(mut sections: Map<String, Value>, name: &str) -> Option<Map<String, Value>> {
    if let Some(value) = sections.remove(name) {
        return value.into_table().ok();
    }

    let mut segments = name.split('.');
    let mut table = sections.remove(segments.next()?)?.into_table().ok()?;
    for segment in segments {
        table = table.remove(segment)?.into_table().ok()?;
    }
    Some(table)
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("client_token", &self.client_token)
            .field("client_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .finish()
    }
}
