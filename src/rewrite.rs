use anyhow::Result;
use regex::Regex;

use crate::arguments::Command;
use crate::version::VersionNumber;

/// Lines whose trimmed text starts with this are never rewritten.
const COMMENT_TOKEN: &str = "//";

/// Outcome of processing one line. `modified` is true for every
/// non-comment line the marker matched, even when the applied command
/// saturated and the text came back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedLine {
    pub line: String,
    pub modified: bool,
    pub new_version: Option<String>,
}

impl ProcessedLine {
    fn unchanged(line: &str) -> Self {
        Self {
            line: line.to_string(),
            modified: false,
            new_version: None,
        }
    }
}

/// Detects version-bearing marker lines and rewrites the literal they
/// carry. The marker pattern is compiled once and reused for every
/// line of every file.
pub struct LineRewriter {
    marker: Regex,
}

impl LineRewriter {
    pub fn new() -> Result<Self> {
        // Matches AssemblyVersion("1.2.3") and AssemblyFileVersion("1.2.3.4");
        // the patch and revision positions may also be '*' or empty.
        let marker = Regex::new(
            r#"Assembly(?:File)?Version\("(?P<version>\d{1,5}\.\d{1,5}\.(?:\d{1,5}|\*)?\.?(?:\d{1,5}|\*)?)"\)"#,
        )?;
        Ok(Self { marker })
    }

    pub fn process(&self, line: &str, command: &Command) -> Result<ProcessedLine> {
        if line.trim_start().starts_with(COMMENT_TOKEN) {
            return Ok(ProcessedLine::unchanged(line));
        }
        let original = match self.marker.captures(line).and_then(|c| c.name("version")) {
            Some(matched) => matched.as_str().to_string(),
            None => return Ok(ProcessedLine::unchanged(line)),
        };

        let replacement = match command {
            Command::ExplicitSet(version) => version.clone(),
            Command::Increment(part) => {
                let mut version = VersionNumber::parse(&original)?;
                version.increment(*part);
                version.render()
            }
            Command::Decrement(part) => {
                let mut version = VersionNumber::parse(&original)?;
                version.decrement(*part);
                version.render()
            }
        };

        // Only the leftmost occurrence of the matched literal is
        // replaced; an identical literal earlier on the line wins the
        // substitution instead of the marker's own. Known hazard, kept.
        let new_line = line.replacen(&original, &replacement, 1);
        Ok(ProcessedLine {
            line: new_line,
            modified: true,
            new_version: Some(replacement),
        })
    }
}
