use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// MIME type a candidate must declare to be admitted.
pub const ACCEPTED_MIME_TYPE: &str = "application/pdf";
/// Largest admissible file, in bytes (16 MiB).
pub const MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;

pub type CandidateId = u64;

/// A file as reported by the shell, before admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

/// An admitted file waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub id: CandidateId,
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    WrongType,
    TooLarge,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::WrongType => write!(f, "Not a PDF file"),
            Rejection::TooLarge => write!(f, "File too large (max 16MB)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Accepted(CandidateId),
    /// A candidate with the same name is already selected; nothing changed.
    AlreadySelected,
    Rejected { name: String, reason: Rejection },
}

/// Checks a file against the admission rules, independently of any selection.
pub fn validate(file: &SelectedFile) -> Result<(), Rejection> {
    if file.mime_type != ACCEPTED_MIME_TYPE {
        return Err(Rejection::WrongType);
    }
    if file.byte_size > MAX_FILE_BYTES {
        return Err(Rejection::TooLarge);
    }
    Ok(())
}

/// The set of files the user intends to submit.
///
/// Entries are keyed by a synthetic id handed out at admission, so iteration
/// follows admission order. Names are kept unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStore {
    entries: BTreeMap<CandidateId, FileCandidate>,
    next_id: CandidateId,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: SelectedFile) -> Admission {
        if self.contains_name(&file.name) {
            return Admission::AlreadySelected;
        }
        if let Err(reason) = validate(&file) {
            return Admission::Rejected {
                name: file.name,
                reason,
            };
        }

        self.next_id += 1;
        let id = self.next_id;
        self.entries.insert(
            id,
            FileCandidate {
                id,
                name: file.name,
                byte_size: file.byte_size,
                mime_type: file.mime_type,
                path: file.path,
            },
        );
        Admission::Accepted(id)
    }

    /// Removes the candidate with `id`. Returns whether an entry was removed.
    pub fn remove(&mut self, id: CandidateId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Removes the candidate called `name`. Returns whether an entry was removed.
    pub fn remove_named(&mut self, name: &str) -> bool {
        let id = self
            .entries
            .values()
            .find(|candidate| candidate.name == name)
            .map(|candidate| candidate.id);
        match id {
            Some(id) => self.remove(id),
            None => false,
        }
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.values().any(|candidate| candidate.name == name)
    }

    pub fn get(&self, id: CandidateId) -> Option<&FileCandidate> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileCandidate> {
        self.entries.values()
    }
}
