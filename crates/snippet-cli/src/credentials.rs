use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the access token lives between runs. The binary uses the file
/// store; tests swap in an in-memory fake.
pub trait CredentialStore {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCredentialStore {
    token_file: PathBuf,
}

impl FileCredentialStore {
    pub fn new(token_file: PathBuf) -> Self {
        Self { token_file }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> io::Result<Option<String>> {
        load_token(&self.token_file)
    }

    fn save(&self, token: &str) -> io::Result<()> {
        save_token(&self.token_file, token)
    }
}

pub fn load_token(path: &Path) -> io::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let token = content.trim();
    if token.is_empty() {
        Ok(None)
    } else {
        Ok(Some(token.to_string()))
    }
}

pub fn save_token(path: &Path, token: &str) -> io::Result<()> {
    let mut payload = token.trim().to_string();
    payload.push('\n');
    write_atomic(path, payload.as_bytes())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "token path must have a parent",
        )
    })?;
    fs::create_dir_all(parent)?;

    let tmp_path = path.with_extension(format!("{}.tmp", std::process::id()));
    fs::write(&tmp_path, bytes)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
