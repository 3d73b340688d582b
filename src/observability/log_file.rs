//! Append-only line file with a single size-triggered backup.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size past which the file is moved to its `.1` backup (4 MiB).
pub const MAX_LOG_BYTES: u64 = 4 * 1024 * 1024;

/// Thread-safe line writer that rotates to `<name>.1` once the file grows
/// past its size limit. An existing backup is replaced.
pub struct LogFile {
    path: PathBuf,
    max_bytes: u64,
    /// Opened on first write.
    file: Mutex<Option<File>>,
}

impl LogFile {
    pub fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_LOG_BYTES)
    }

    pub fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the rotated backup: the file name with `.1` appended.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".1");
        self.path.with_file_name(name)
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Fails if the lock is poisoned or the file cannot be rotated, opened or
    /// written.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("Mutex poisoned: {e}")))?;

        self.rotate_if_full(&mut file)?;

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(self.path())?);
        }

        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;
        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn rotate_if_full(&self, file: &mut Option<File>) -> io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.path) else {
            return Ok(());
        };
        if metadata.len() < self.max_bytes {
            return Ok(());
        }

        *file = None;
        let backup = self.backup_path();
        match fs::remove_file(&backup) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::rename(&self.path, backup)
    }
}

impl std::fmt::Debug for LogFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines_and_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::new(dir.path().join("spans.jsonl"));

        log.append_line("{\"a\":1}").unwrap();
        log.append_line("{\"b\":2}").unwrap();

        let contents = fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, "{\"a\":1}\n{\"b\":2}\n");
        assert!(!log.backup_path().exists());
    }

    #[test]
    fn backup_name_appends_suffix() {
        let log = LogFile::new(PathBuf::from("/data/bookfinder-spans.jsonl"));
        assert_eq!(log.backup_path(), PathBuf::from("/data/bookfinder-spans.jsonl.1"));
    }

    #[test]
    fn rotates_to_single_backup_past_limit() {
        let dir = tempfile::tempdir().unwrap();
        let log = LogFile::with_limit(dir.path().join("spans.jsonl"), 16);

        log.append_line("first line, long").unwrap();
        log.append_line("second").unwrap();
        assert_eq!(fs::read_to_string(log.backup_path()).unwrap(), "first line, long\n");
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "second\n");

        log.append_line("third line, long").unwrap();
        log.append_line("fourth").unwrap();
        assert_eq!(
            fs::read_to_string(log.backup_path()).unwrap(),
            "second\nthird line, long\n"
        );
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "fourth\n");
    }
}
