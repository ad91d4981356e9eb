use anyhow::Result;
use log::debug;
use std::path::PathBuf;

use crate::arguments::TransformRequest;
use crate::io::IoPort;
use crate::rewrite::LineRewriter;

/// One successfully rewritten line: the version it now carries and the
/// file it lives in. Purely a reporting artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub version: String,
    pub file: PathBuf,
}

/// Walks every file matching the request's pattern, rewrites matching
/// lines, and persists files that changed (unless dry-run). Files whose
/// read or write fails are reported through the port and skipped; the
/// scan carries on with the rest.
pub fn run(request: &TransformRequest, io: &mut dyn IoPort) -> Result<Vec<ChangeRecord>> {
    let Some(command) = &request.command else {
        return Ok(Vec::new());
    };
    let rewriter = LineRewriter::new()?;
    let verbose = request.is_verbose();
    let mut records = Vec::new();

    let files = io.enumerate_files(request.file_pattern_or_default())?;
    for file in files {
        if verbose {
            io.write_line(&format!("Processing file: {}", file.display()));
        }
        let lines = match io.read_lines(&file) {
            Ok(lines) => lines,
            Err(error) => {
                io.write_line(&format!("error: {:#}", error));
                continue;
            }
        };

        let mut rewritten = Vec::with_capacity(lines.len());
        let mut file_modified = false;
        for (index, line) in lines.iter().enumerate() {
            let result = rewriter.process(line, command)?;
            if result.modified {
                file_modified = true;
                if verbose {
                    let prefix = if request.dry_run { "Would Change" } else { "Changed" };
                    io.write_line(&format!(
                        "{} (Line {}): {} to {}",
                        prefix,
                        index + 1,
                        line,
                        result.line
                    ));
                }
                if let Some(version) = &result.new_version {
                    records.push(ChangeRecord {
                        version: version.clone(),
                        file: file.clone(),
                    });
                }
            }
            rewritten.push(result.line);
        }

        if request.dry_run || !file_modified {
            debug!("Nothing to write for {:?}", file);
            continue;
        }
        if let Err(error) = io.write_lines(&rewritten, &file) {
            io.write_line(&format!("error: {:#}", error));
        }
    }

    Ok(records)
}
