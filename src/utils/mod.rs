use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::common::{MAX_STORED_NAME_BYTES, STORED_FILE_DELIMITER, STORED_FILE_PREFIX};

/// Reduce a client supplied filename to its final component.
///
/// Both `/` and `\` count as separators since browsers on Windows may send full
/// paths. Control characters are dropped so the name is safe to echo back in a
/// header. Returns `None` when nothing usable remains.
pub fn original_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let trimmed = cleaned.trim();
    match trimmed {
        "" | "." | ".." => None,
        name => Some(name.to_string()),
    }
}

/// `<upload_dir>/share-<unique>-<filename>`, with the filename segment truncated on a
/// char boundary so the whole name stays within filesystem limits.
pub fn stored_file_path(upload_dir: &Path, unique: Uuid, filename: &str) -> PathBuf {
    let mut end = filename.len().min(MAX_STORED_NAME_BYTES);
    while !filename.is_char_boundary(end) {
        end -= 1;
    }
    upload_dir.join(format!(
        "{STORED_FILE_PREFIX}{STORED_FILE_DELIMITER}{unique}{STORED_FILE_DELIMITER}{}",
        &filename[..end]
    ))
}
