use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::arguments::{OutputMode, TransformRequest};
use crate::io::IoPort;
use crate::pipeline::ChangeRecord;

/// Renders the end-of-run summary. Quiet suppresses it entirely, and
/// under Verbose the pipeline's per-line trace already told the whole
/// story, so only the default mode emits anything here.
pub fn emit(records: &[ChangeRecord], request: &TransformRequest, io: &mut dyn IoPort) {
    if request.output != OutputMode::Default {
        return;
    }
    for line in summarize(records) {
        io.write_line(&line);
    }
}

/// One line per distinct resulting version, ordered by version string:
/// `1.3.1 (4 occurrences in 2 files)`, each noun pluralized on its own
/// count.
pub fn summarize(records: &[ChangeRecord]) -> Vec<String> {
    let mut grouped: BTreeMap<&str, (usize, BTreeSet<&Path>)> = BTreeMap::new();
    for record in records {
        let entry = grouped.entry(record.version.as_str()).or_default();
        entry.0 += 1;
        entry.1.insert(record.file.as_path());
    }

    grouped
        .into_iter()
        .map(|(version, (occurrences, files))| {
            format!(
                "{} ({} {} in {} {})",
                version,
                occurrences,
                pluralize(occurrences, "occurrence", "occurrences"),
                files.len(),
                pluralize(files.len(), "file", "files"),
            )
        })
        .collect()
}

fn pluralize(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count > 1 { plural } else { singular }
}
