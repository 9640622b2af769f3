use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary .edgerc file for a test run
pub struct Edgerc {
    pub root: TempDir,
}

#[allow(dead_code)]
impl Edgerc {
    pub fn empty_dir() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Credential file whose `host` is the given mock server URI
    pub fn pointing_at(uri: &str) -> Self {
        let edgerc = Self::empty_dir();
        let content = format!(
            "[default]\n\
             host = {uri}\n\
             client_token = akab-client-token\n\
             client_secret = c2VjcmV0LXNlY3JldA\n\
             access_token = akab-access-token\n"
        );
        fs::write(edgerc.path(), content).unwrap();
        edgerc
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().join(".edgerc")
    }

    pub fn missing_path(&self) -> PathBuf {
        self.root.path().join("does-not-exist")
    }

    /// `--edgerc <path>` followed by `rest`
    pub fn args(&self, rest: &[&str]) -> Vec<String> {
        let mut args = vec!["--edgerc".to_string(), self.path().display().to_string()];
        args.extend(rest.iter().map(|arg| arg.to_string()));
        args
    }
}
