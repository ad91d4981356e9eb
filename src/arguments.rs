use clap::Parser;
use thiserror::Error;

use crate::io::pattern_to_regex;
use crate::version::VersionPart;

/// Filename pattern searched for when no positional pattern is given.
pub const DEFAULT_FILE_PATTERN: &str = "AssemblyInfo.cs";

pub const HELP_HINT: &str = "Try 'stampver --help' for more information.";

pub const HELP_TEXT: &str = "\
stampver - stamp version numbers across a source tree
=====================================================

Walks every file below the current directory whose name matches the
file pattern (AssemblyInfo.cs when none is given) and rewrites the
version literal inside AssemblyVersion(\"...\") and
AssemblyFileVersion(\"...\") attribute lines.

Usage:
  stampver [command] [part or version] [--quiet|--verbose] [--dryrun] [FILEPATTERN]

Commands:
  -i <PART>     Increment the given version number part by 1.
  -d <PART>     Decrement the given version number part by 1.
  -e <VERSION>  Replace the entire version number with the given value.

Parts:
  major         The first version number part.
  minor         The second version number part.
  patch         The third version number part.
  build         Synonym for patch.

An explicit version is three (or four) numbers in the range 0 to 65535,
separated by periods, e.g. 1.4.2 or 1.4.2.0. Part names only apply to
-i and -d; an explicit version only applies to -e.

Options:
  --quiet       Do not write anything to the console.
  --verbose     Log every file processed and every line changed.
  --dryrun      Report what would change without updating any file.
  --help        Show this text.

--quiet and --verbose are mutually exclusive, and --dryrun always
enables verbose output. A FILEPATTERN names files (wildcards * and ?),
never paths; matching inside each file is unchanged, so a file must
still contain an AssemblyVersion or AssemblyFileVersion attribute
before anything is rewritten.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("the '-i', '-d' and '-e' commands are mutually exclusive ('{0}' given after another command)")]
    ConflictingCommand(&'static str),
    #[error("the '--quiet' and '--verbose' options are mutually exclusive")]
    ConflictingOutputMode,
    #[error("invalid version number part '{0}'")]
    InvalidVersionPart(String),
    #[error("invalid version number '{0}'")]
    InvalidExplicitVersion(String),
    #[error("must specify a valid version number command")]
    MissingCommand,
    #[error("invalid file pattern '{0}'")]
    InvalidFilePattern(String),
}

/// Raw command line as clap hands it over. Help is a modeled flag
/// rather than clap's built-in so it flows into the request like every
/// other option.
#[derive(Debug, Parser)]
#[command(name = "stampver", version, about, disable_help_flag = true)]
pub struct Arguments {
    /// Increment the given version number part by 1 (major, minor, patch or build)
    #[arg(short = 'i', value_name = "PART")]
    pub increment: Option<String>,
    /// Decrement the given version number part by 1
    #[arg(short = 'd', value_name = "PART")]
    pub decrement: Option<String>,
    /// Replace the entire version number with the given x.y.z value
    #[arg(short = 'e', value_name = "VERSION")]
    pub explicit: Option<String>,
    /// Do not write anything to the console
    #[arg(long)]
    pub quiet: bool,
    /// Log every file processed and every line changed
    #[arg(long)]
    pub verbose: bool,
    /// Report what would change without updating any file
    #[arg(long)]
    pub dryrun: bool,
    /// Show the full usage text
    #[arg(long)]
    pub help: bool,
    /// Filename pattern to search for below the current directory
    #[arg(value_name = "FILEPATTERN")]
    pub file_pattern: Option<String>,
}

impl Arguments {
    /// Threads the parsed flags through the request builder in flag
    /// order, so exclusivity violations surface at the offending flag.
    pub fn into_request(self) -> Result<TransformRequest, RequestError> {
        let mut builder = RequestBuilder::new();
        if let Some(part) = &self.increment {
            builder = builder.increment(part)?;
        }
        if let Some(part) = &self.decrement {
            builder = builder.decrement(part)?;
        }
        if let Some(version) = &self.explicit {
            builder = builder.explicit(version)?;
        }
        if self.quiet {
            builder = builder.quiet()?;
        }
        if self.verbose {
            builder = builder.verbose()?;
        }
        if self.dryrun {
            builder = builder.dry_run();
        }
        if let Some(pattern) = &self.file_pattern {
            builder = builder.file_pattern(pattern);
        }
        if self.help {
            builder = builder.help();
        }
        builder.build()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Default,
    Quiet,
    Verbose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Increment(VersionPart),
    Decrement(VersionPart),
    ExplicitSet(String),
}

/// A validated run description. `command` is absent only when help was
/// requested; read-only once built.
#[derive(Debug, Clone)]
pub struct TransformRequest {
    pub command: Option<Command>,
    pub output: OutputMode,
    pub dry_run: bool,
    pub file_pattern: Option<String>,
    pub help: bool,
}

impl TransformRequest {
    pub fn file_pattern_or_default(&self) -> &str {
        self.file_pattern.as_deref().unwrap_or(DEFAULT_FILE_PATTERN)
    }

    pub fn is_verbose(&self) -> bool {
        self.output == OutputMode::Verbose
    }
}

/// Owning builder for [`TransformRequest`]. Each setter checks its own
/// exclusivity invariant and fails fast with a typed error instead of
/// deferring to `build`.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    command: Option<Command>,
    output: Option<OutputMode>,
    dry_run: bool,
    file_pattern: Option<String>,
    help: bool,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(self, part: &str) -> Result<Self, RequestError> {
        self.ensure_no_command("-i")?;
        let part = parse_part(part)?;
        Ok(Self {
            command: Some(Command::Increment(part)),
            ..self
        })
    }

    pub fn decrement(self, part: &str) -> Result<Self, RequestError> {
        self.ensure_no_command("-d")?;
        let part = parse_part(part)?;
        Ok(Self {
            command: Some(Command::Decrement(part)),
            ..self
        })
    }

    pub fn explicit(self, version: &str) -> Result<Self, RequestError> {
        self.ensure_no_command("-e")?;
        validate_explicit_version(version)?;
        Ok(Self {
            command: Some(Command::ExplicitSet(version.to_string())),
            ..self
        })
    }

    pub fn quiet(self) -> Result<Self, RequestError> {
        self.ensure_no_output_mode()?;
        Ok(Self {
            output: Some(OutputMode::Quiet),
            ..self
        })
    }

    pub fn verbose(self) -> Result<Self, RequestError> {
        self.ensure_no_output_mode()?;
        Ok(Self {
            output: Some(OutputMode::Verbose),
            ..self
        })
    }

    pub fn dry_run(self) -> Self {
        Self {
            dry_run: true,
            ..self
        }
    }

    pub fn file_pattern(self, pattern: &str) -> Self {
        Self {
            file_pattern: Some(pattern.to_string()),
            ..self
        }
    }

    pub fn help(self) -> Self {
        Self { help: true, ..self }
    }

    pub fn build(self) -> Result<TransformRequest, RequestError> {
        if self.command.is_none() && !self.help {
            return Err(RequestError::MissingCommand);
        }
        if let Some(pattern) = &self.file_pattern {
            if pattern_to_regex(pattern).is_err() {
                return Err(RequestError::InvalidFilePattern(pattern.clone()));
            }
        }
        // A dry run always traces what it would have done, even when
        // quiet was also given.
        let output = if self.dry_run {
            OutputMode::Verbose
        } else {
            self.output.unwrap_or_default()
        };
        Ok(TransformRequest {
            command: self.command,
            output,
            dry_run: self.dry_run,
            file_pattern: self.file_pattern,
            help: self.help,
        })
    }

    fn ensure_no_command(&self, flag: &'static str) -> Result<(), RequestError> {
        if self.command.is_some() {
            return Err(RequestError::ConflictingCommand(flag));
        }
        Ok(())
    }

    fn ensure_no_output_mode(&self) -> Result<(), RequestError> {
        if self.output.is_some() {
            return Err(RequestError::ConflictingOutputMode);
        }
        Ok(())
    }
}

fn parse_part(name: &str) -> Result<VersionPart, RequestError> {
    VersionPart::from_name(name).ok_or_else(|| RequestError::InvalidVersionPart(name.to_string()))
}

/// An explicit version needs at least three dot-separated segments and
/// every segment, including a tolerated trailing revision, must be an
/// integer in [0, 65535].
fn validate_explicit_version(version: &str) -> Result<(), RequestError> {
    let segments: Vec<&str> = version.split('.').collect();
    if segments.len() < 3 {
        return Err(RequestError::InvalidExplicitVersion(version.to_string()));
    }
    for segment in segments {
        if segment.parse::<u16>().is_err() {
            return Err(RequestError::InvalidExplicitVersion(version.to_string()));
        }
    }
    Ok(())
}
