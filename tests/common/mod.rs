#![allow(dead_code)]

use anyhow::{Result, bail};
use clap::Parser;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use stampver::arguments::{Arguments, HELP_HINT, HELP_TEXT};
use stampver::io::IoPort;
use stampver::{pipeline, report};

/// In-memory stand-in for the filesystem port. Seeded with named
/// files; every write and every console line is recorded for
/// inspection instead of touching disk. Enumeration lists every seeded
/// file: pattern filtering is the production port's concern.
pub struct FakeIo {
    files: BTreeMap<PathBuf, Vec<String>>,
    failing_reads: BTreeSet<PathBuf>,
    failing_writes: BTreeSet<PathBuf>,
    pub written: BTreeMap<PathBuf, Vec<String>>,
    pub stdout: Vec<String>,
}

impl FakeIo {
    pub fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            failing_reads: BTreeSet::new(),
            failing_writes: BTreeSet::new(),
            written: BTreeMap::new(),
            stdout: Vec::new(),
        }
    }

    pub fn with_file(mut self, name: &str, contents: &str) -> Self {
        self.files.insert(
            PathBuf::from(name),
            contents.lines().map(str::to_string).collect(),
        );
        self
    }

    pub fn failing_read(mut self, name: &str) -> Self {
        self.failing_reads.insert(PathBuf::from(name));
        self
    }

    pub fn failing_write(mut self, name: &str) -> Self {
        self.failing_writes.insert(PathBuf::from(name));
        self
    }

    pub fn written_lines(&self) -> Vec<String> {
        self.written.values().flatten().cloned().collect()
    }

    pub fn written_has_line(&self, line: &str) -> bool {
        self.written.values().flatten().any(|l| l == line)
    }

    pub fn stdout_has_line(&self, line: &str) -> bool {
        self.stdout.iter().any(|l| l == line)
    }

    pub fn stdout_mentions(&self, needle: &str) -> bool {
        self.stdout.iter().any(|l| l.contains(needle))
    }
}

impl IoPort for FakeIo {
    fn enumerate_files(&self, _pattern: &str) -> Result<Vec<PathBuf>> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read_lines(&self, file: &Path) -> Result<Vec<String>> {
        if self.failing_reads.contains(file) {
            bail!("cannot read {}", file.display());
        }
        match self.files.get(file) {
            Some(lines) => Ok(lines.clone()),
            None => bail!("no such file: {}", file.display()),
        }
    }

    fn write_lines(&mut self, lines: &[String], file: &Path) -> Result<()> {
        if self.failing_writes.contains(file) {
            bail!("cannot replace {}", file.display());
        }
        self.written.insert(file.to_path_buf(), lines.to_vec());
        Ok(())
    }

    fn write_line(&mut self, line: &str) {
        self.stdout.push(line.to_string());
    }
}

/// Drives the tool end to end the way `main` does, against any port:
/// argument parsing, request validation with the `error:` + hint
/// wording, help short-circuit, pipeline, report.
pub fn run_tool(io: &mut dyn IoPort, args: &[&str]) {
    let arguments = Arguments::parse_from(args);
    let request = match arguments.into_request() {
        Ok(request) => request,
        Err(error) => {
            io.write_line(&format!("error: {}", error));
            io.write_line(HELP_HINT);
            return;
        }
    };
    if request.help {
        io.write_line(HELP_TEXT);
        return;
    }
    match pipeline::run(&request, io) {
        Ok(records) => report::emit(&records, &request, io),
        Err(error) => io.write_line(&format!("error: {:#}", error)),
    }
}

/// Canonical three-file tree: one file carrying a pair of 1.0.0.0
/// markers, two files carrying a pair of 1.3.0 markers each, plus a
/// commented-out marker that must never be rewritten.
pub fn assembly_fixture() -> FakeIo {
    let three_part = r#"using System.Reflection;

// Version information for the assembly.
// [assembly: AssemblyVersion("1.0.*")]
[assembly: AssemblyTitle("demo")]
[assembly: AssemblyVersion("1.3.0")]
[assembly: AssemblyFileVersion("1.3.0")]"#;

    let four_part = r#"using System.Reflection;

[assembly: AssemblyTitle("demo.tests")]
[assembly: AssemblyVersion("1.0.0.0")]
[assembly: AssemblyFileVersion("1.0.0.0")]"#;

    FakeIo::new()
        .with_file("File1", three_part)
        .with_file("File2", four_part)
        .with_file("File3", three_part)
}
