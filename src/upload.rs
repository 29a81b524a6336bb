use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path} is {size} bytes, limit is {limit}")]
    TooLarge { path: String, size: u64, limit: u64 },
    #[error("{path} is not valid UTF-8 text")]
    NotUtf8 { path: String },
    #[error("{path} contains no text")]
    Empty { path: String },
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~')
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest.trim_start_matches(['/', '\\']));
    }
    PathBuf::from(input)
}

/// Reads a practice text file for use as custom text.
pub fn load_custom_text(path: &Path, limit: u64) -> Result<String, UploadError> {
    let shown = path.display().to_string();
    let result = read_limited(path, &shown, limit);
    match &result {
        Ok(text) => info!(path = shown.as_str(), chars = text.chars().count(), "loaded custom text"),
        Err(e) => warn!(path = shown.as_str(), error = %e, "custom text upload rejected"),
    }
    result
}

fn read_limited(path: &Path, display: &str, limit: u64) -> Result<String, UploadError> {
    let io_err = |source: io::Error| UploadError::Io {
        path: display.to_string(),
        source,
    };

    let size = fs::metadata(path).map_err(io_err)?.len();
    if size > limit {
        return Err(UploadError::TooLarge {
            path: display.to_string(),
            size,
            limit,
        });
    }

    let bytes = fs::read(path).map_err(io_err)?;
    let text = String::from_utf8(bytes).map_err(|_| UploadError::NotUtf8 {
        path: display.to_string(),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    // Windows line endings would otherwise demand a '\r' keystroke.
    let text = text.replace("\r\n", "\n");

    if text.trim().is_empty() {
        return Err(UploadError::Empty {
            path: display.to_string(),
        });
    }
    Ok(text)
}
