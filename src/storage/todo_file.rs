//! Plain-text storage for todo.txt files
//!
//! One task per line. Reads keep each line's own terminator so that a
//! rewrite leaves untouched lines byte-identical; writes replace the whole
//! file through a temp file and rename.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// One line of a todo.txt file with its original terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Line text without `\n` / `\r\n`
    pub text: String,
    /// The terminator that followed the text (empty on an unterminated last line)
    pub ending: &'static str,
}

impl RawLine {
    /// Creates a newline-terminated line
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ending: "\n",
        }
    }
}

/// Splits file content into lines, keeping terminators
pub fn split_lines(content: &str) -> Vec<RawLine> {
    content
        .split_inclusive('\n')
        .map(|segment| {
            if let Some(text) = segment.strip_suffix("\r\n") {
                RawLine { text: text.to_string(), ending: "\r\n" }
            } else if let Some(text) = segment.strip_suffix('\n') {
                RawLine { text: text.to_string(), ending: "\n" }
            } else {
                RawLine { text: segment.to_string(), ending: "" }
            }
        })
        .collect()
}

/// Joins lines back into file content
pub fn join_lines(lines: &[RawLine]) -> String {
    let mut content = String::new();
    for line in lines {
        content.push_str(&line.text);
        content.push_str(line.ending);
    }
    content
}

/// Handle on a todo.txt file
#[derive(Debug, Clone)]
pub struct TodoFile {
    path: PathBuf,
}

impl TodoFile {
    /// Creates a handle for the given path; nothing is touched on disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Creates an empty file (and parent directories) if none exists
    ///
    /// Returns true if the file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .with_context(|| format!("Failed to create task file: {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "created empty task file");
        Ok(true)
    }

    /// Reads the full file content
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read task file: {}", self.path.display()))
    }

    /// Replaces the full file content
    ///
    /// A symlinked path is resolved first so the link target is updated and
    /// the link itself survives. The existing file's permissions carry over.
    pub fn write(&self, content: &str) -> Result<()> {
        let target = self.resolved_path()?;
        let temp_path = temp_path_for(&target);

        let written = write_temp(&temp_path, &target, content).and_then(|()| {
            // Atomic rename
            fs::rename(&temp_path, &target).with_context(|| {
                format!(
                    "Failed to rename {} to {}",
                    temp_path.display(),
                    target.display()
                )
            })
        });

        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written?;

        tracing::debug!(path = %target.display(), bytes = content.len(), "wrote task file");
        Ok(())
    }

    /// Follows symlinks; a path that does not exist yet is used as given
    fn resolved_path(&self) -> Result<PathBuf> {
        match fs::canonicalize(&self.path) {
            Ok(path) => Ok(path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to resolve task file: {}", self.path.display())),
        }
    }
}

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

fn write_temp(temp_path: &Path, target: &Path, content: &str) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    let mut writer = BufWriter::new(&file);
    writer
        .write_all(content.as_bytes())
        .context("Failed to write task file")?;
    writer.flush().context("Failed to flush task file")?;
    drop(writer);

    if let Ok(metadata) = fs::metadata(target) {
        file.set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to set permissions: {}", temp_path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn split_keeps_terminators() {
        let lines = split_lines("A\nB\r\nC");
        assert_eq!(
            lines,
            vec![
                RawLine { text: "A".to_string(), ending: "\n" },
                RawLine { text: "B".to_string(), ending: "\r\n" },
                RawLine { text: "C".to_string(), ending: "" },
            ]
        );
        assert_eq!(join_lines(&lines), "A\nB\r\nC");
    }

    #[test]
    fn split_empty_and_blank_lines() {
        assert!(split_lines("").is_empty());

        let lines = split_lines("A\n\nB\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].text, "");
    }

    #[test]
    fn ensure_exists_creates_once() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("nested").join("todo.txt"));

        assert!(!file.exists());
        assert!(file.ensure_exists().unwrap());
        assert!(file.exists());
        assert_eq!(file.read().unwrap(), "");

        file.write("keep me\n").unwrap();
        assert!(!file.ensure_exists().unwrap());
        assert_eq!(file.read().unwrap(), "keep me\n");
    }

    #[test]
    fn write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        file.write("A\nB\n").unwrap();
        file.write("C\n").unwrap();
        assert_eq!(file.read().unwrap(), "C\n");
    }

    #[test]
    fn atomic_write() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("todo.txt"));

        file.write("A\n").unwrap();

        // Temp file should not exist after write
        assert!(!dir.path().join("todo.txt.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn write_through_symlink_updates_target() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.txt");
        let link = dir.path().join("todo.txt");
        fs::write(&real, "A\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        TodoFile::new(&link).write("A\nB\n").unwrap();

        assert_eq!(fs::read_to_string(&real).unwrap(), "A\nB\n");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(!dir.path().join("real.txt.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::write(&path, "A\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        TodoFile::new(&path).write("B\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.txt");
        fs::create_dir(&path).unwrap();

        // Renaming a file over a directory fails after the temp file is written
        assert!(TodoFile::new(&path).write("A\n").is_err());
        assert!(!dir.path().join("todo.txt.tmp").exists());
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = TodoFile::new(dir.path().join("missing.txt"));
        assert!(file.read().is_err());
    }
}
