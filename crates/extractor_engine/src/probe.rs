use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// What the shell knows about a local file before admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("No such file")]
    NotFound,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Not a regular file")]
    NotAFile,
    #[error("{0}")]
    Io(io::Error),
}

impl From<io::Error> for ProbeError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ProbeError::NotFound,
            io::ErrorKind::PermissionDenied => ProbeError::PermissionDenied,
            _ => ProbeError::Io(err),
        }
    }
}

/// Reads size and content type of `path`.
///
/// The type comes from the leading bytes, not the extension.
pub fn probe_file(path: &Path) -> Result<ProbedFile, ProbeError> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(ProbeError::NotAFile);
    }

    let mut head = [0u8; 4];
    let mut file = fs::File::open(path)?;
    let read = read_head(&mut file, &mut head)?;

    Ok(ProbedFile {
        name: display_name(path),
        byte_size: meta.len(),
        mime_type: sniff_mime_type(&head[..read]).to_string(),
        path: path.to_path_buf(),
    })
}

/// Final path component, or the whole path if there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn sniff_mime_type(head: &[u8]) -> &'static str {
    if head.starts_with(b"%PDF") {
        PDF_MIME_TYPE
    } else {
        UNKNOWN_MIME_TYPE
    }
}

fn read_head(file: &mut fs::File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
