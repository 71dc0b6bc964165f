use std::path::PathBuf;

/// What a share code points at.
///
/// The original filename is kept as its own field so that downloads never have to
/// parse it back out of the stored file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareEntry {
    pub path: PathBuf,
    pub original_filename: String,
    pub size: u64,
}

impl ShareEntry {
    pub fn new(path: impl Into<PathBuf>, original_filename: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            original_filename: original_filename.into(),
            size,
        }
    }
}
