use anyhow::{Context, Result, bail};
use log::debug;
use regex::Regex;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The side-effect boundary of the tool. Everything the scan touches
/// (file discovery, reads, replacement writes, console output) goes
/// through this port, so the whole pipeline runs against an in-memory
/// fake in tests.
pub trait IoPort {
    fn enumerate_files(&self, pattern: &str) -> Result<Vec<PathBuf>>;
    fn read_lines(&self, file: &Path) -> Result<Vec<String>>;
    fn write_lines(&mut self, lines: &[String], file: &Path) -> Result<()>;
    fn write_line(&mut self, line: &str);
}

/// Compiles a filename pattern (`*` and `?` wildcards, everything else
/// literal) into an anchored case-insensitive matcher. Patterns name
/// files, not paths, so separators are rejected.
pub fn pattern_to_regex(pattern: &str) -> Result<Regex> {
    if pattern.trim().is_empty() {
        bail!("file pattern is empty");
    }
    if pattern.contains(['/', '\\']) {
        bail!("file pattern '{}' must not contain path separators", pattern);
    }
    let mut expression = String::from("(?i)^");
    for ch in pattern.chars() {
        match ch {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            other => expression.push_str(&regex::escape(&other.to_string())),
        }
    }
    expression.push('$');
    Ok(Regex::new(&expression)?)
}

/// Production port: recursive walk below a root directory, whole-file
/// reads, and temp-then-replace writes.
pub struct FsIo {
    root: PathBuf,
}

impl FsIo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl IoPort for FsIo {
    fn enumerate_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = pattern_to_regex(pattern)?;
        let mut files: Vec<PathBuf> = vec![];

        for entry in WalkDir::new(&self.root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if matcher.is_match(entry.file_name().to_string_lossy().as_ref()) {
                files.push(entry.path().to_path_buf());
            }
        }

        debug!("Found files: {:?}", files);
        Ok(files)
    }

    fn read_lines(&self, file: &Path) -> Result<Vec<String>> {
        let contents = fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?;
        Ok(contents.lines().map(str::to_string).collect())
    }

    fn write_lines(&mut self, lines: &[String], file: &Path) -> Result<()> {
        // Stage the full replacement next to the target, then swap it in,
        // so an interrupted write never leaves a half-written file.
        let directory = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = tempfile::NamedTempFile::new_in(directory)
            .with_context(|| format!("failed to stage replacement for {}", file.display()))?;
        for line in lines {
            writeln!(staged, "{}", line)?;
        }
        staged
            .persist(file)
            .with_context(|| format!("failed to replace {}", file.display()))?;
        Ok(())
    }

    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}
