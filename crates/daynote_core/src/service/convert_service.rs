//! Export directory → daily journal conversion.
//!
//! # Responsibility
//! - Enumerate `*.json` exports directly inside an input directory.
//! - Validate, filter, render and append each note to its daily file.
//! - Isolate per-file failures and collect run statistics.
//!
//! # Invariants
//! - Files are processed strictly one at a time, in `read_dir` order. That
//!   order is platform-defined and not sorted, so notes sharing a day are
//!   appended in whatever order the file system lists them.
//! - A read or validation failure skips only that file.
//! - Listing the input directory or writing a daily file is fatal.
//! - The progress line is written once, before any conversion.

use crate::import::record::{parse_note, ValidationError};
use crate::render::daily::{daily_entry, DailyEntry};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Extension of note export files, without the dot.
pub const NOTE_FILE_EXTENSION: &str = "json";

/// Fatal conversion failure; aborts the run.
#[derive(Debug)]
pub enum ConvertError {
    /// Input directory could not be listed.
    ListInput { dir: PathBuf, source: io::Error },
    /// A daily file could not be created or appended to.
    Write { file_name: String, source: io::Error },
    /// Progress stream rejected a write.
    Progress(io::Error),
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListInput { dir, source } => {
                write!(f, "failed to list `{}`: {source}", dir.display())
            }
            Self::Write { file_name, source } => {
                write!(f, "failed to write daily note `{file_name}`: {source}")
            }
            Self::Progress(err) => write!(f, "failed to report progress: {err}"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ListInput { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
            Self::Progress(err) => Some(err),
        }
    }
}

/// Why one input file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File vanished or could not be read.
    Read(String),
    /// Content is not a valid note record.
    Invalid(ValidationError),
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read(message) => write!(f, "read failed: {message}"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

/// Input file that produced no output because of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Per-run statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    /// Candidate `*.json` files found.
    pub found: usize,
    /// Notes appended to a daily file.
    pub written: usize,
    /// Valid notes with neither title nor content.
    pub skipped_empty: usize,
    /// Files skipped because of read or validation errors.
    pub failures: Vec<SkippedFile>,
    /// Distinct daily files written to, in first-write order.
    pub daily_files: Vec<String>,
}

/// Result of converting one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Note was appended to the named daily file.
    Written(String),
    /// Note was valid but empty.
    Empty,
    /// File was not converted.
    Skipped(SkipReason),
}

/// Destination for rendered daily entries.
pub trait JournalSink {
    /// Appends `entry` to its daily file, creating the file when missing.
    fn append(&mut self, entry: &DailyEntry) -> io::Result<()>;
}

/// Journal sink writing `<root>/<file_name>` on disk.
///
/// `root` must already exist; it is never created here.
#[derive(Debug, Clone)]
pub struct DirectoryJournal {
    root: PathBuf,
}

impl DirectoryJournal {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl JournalSink for DirectoryJournal {
    fn append(&mut self, entry: &DailyEntry) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.root.join(&entry.file_name))?;
        file.write_all(entry.markdown.as_bytes())
    }
}

/// Conversion use-case over a journal sink.
pub struct ConvertService<S: JournalSink> {
    sink: S,
}

impl<S: JournalSink> ConvertService<S> {
    /// Creates a service writing into the provided sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Returns the sink, e.g. to inspect what was written.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Converts every note export directly inside `input_dir`.
    ///
    /// # Side effects
    /// - Writes a `Found N ...` line, then one line per skipped file, to
    ///   `progress`.
    /// - Emits `convert_start` / `convert_finish` logging events.
    ///
    /// # Errors
    /// - Returns `ListInput` when `input_dir` cannot be listed.
    /// - Returns `Write` on the first daily file write failure.
    /// - Returns `Progress` when `progress` rejects a write.
    pub fn convert_dir(
        &mut self,
        input_dir: &Path,
        progress: &mut impl Write,
    ) -> Result<ConvertReport, ConvertError> {
        let started_at = Instant::now();
        let files = list_note_files(input_dir).map_err(|source| {
            error!(
                "event=convert_start module=convert status=error error_code=list_failed error={}",
                source
            );
            ConvertError::ListInput {
                dir: input_dir.to_path_buf(),
                source,
            }
        })?;

        info!(
            "event=convert_start module=convert status=start input_files={}",
            files.len()
        );
        writeln!(progress, "Found {} note export files...", files.len())
            .map_err(ConvertError::Progress)?;

        let mut report = ConvertReport {
            found: files.len(),
            ..ConvertReport::default()
        };

        for path in files {
            match self.convert_file(&path)? {
                FileOutcome::Written(file_name) => {
                    report.written += 1;
                    if !report.daily_files.contains(&file_name) {
                        report.daily_files.push(file_name);
                    }
                }
                FileOutcome::Empty => report.skipped_empty += 1,
                FileOutcome::Skipped(reason) => {
                    writeln!(
                        progress,
                        "An error occurred while parsing {} ({reason}), skipping...",
                        path.display()
                    )
                    .map_err(ConvertError::Progress)?;
                    report.failures.push(SkippedFile { path, reason });
                }
            }
        }

        info!(
            "event=convert_finish module=convert status=ok duration_ms={} found={} written={} daily_files={} empty={} failed={}",
            started_at.elapsed().as_millis(),
            report.found,
            report.written,
            report.daily_files.len(),
            report.skipped_empty,
            report.failures.len()
        );
        Ok(report)
    }

    /// Converts one export file.
    ///
    /// Read and validation failures come back as `FileOutcome::Skipped`;
    /// only sink failures are errors.
    pub fn convert_file(&mut self, path: &Path) -> Result<FileOutcome, ConvertError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(
                    "event=note_skipped module=convert status=error error_code=read_failed path={} error={}",
                    path.display(),
                    err
                );
                return Ok(FileOutcome::Skipped(SkipReason::Read(err.to_string())));
            }
        };

        let note = match parse_note(&bytes) {
            Ok(note) => note,
            Err(err) => {
                warn!(
                    "event=note_skipped module=convert status=error error_code=invalid_note path={} error={}",
                    path.display(),
                    err
                );
                return Ok(FileOutcome::Skipped(SkipReason::Invalid(err)));
            }
        };

        if note.is_empty() {
            debug!(
                "event=note_skipped module=convert status=ok reason=empty path={}",
                path.display()
            );
            return Ok(FileOutcome::Empty);
        }

        let entry = daily_entry(&note);
        if let Err(source) = self.sink.append(&entry) {
            error!(
                "event=note_written module=convert status=error error_code=write_failed file={} error={}",
                entry.file_name, source
            );
            return Err(ConvertError::Write {
                file_name: entry.file_name,
                source,
            });
        }

        debug!(
            "event=note_written module=convert status=ok file={} bytes={}",
            entry.file_name,
            entry.markdown.len()
        );
        Ok(FileOutcome::Written(entry.file_name))
    }
}

/// Converts `input_dir` into daily files under `output_dir`, reporting
/// progress on stdout.
///
/// Both directories must already exist.
pub fn convert(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<ConvertReport, ConvertError> {
    let stdout = io::stdout();
    let mut progress = stdout.lock();
    convert_with_progress(input_dir, output_dir, &mut progress)
}

/// Same as [`convert`], with an explicit progress stream.
pub fn convert_with_progress(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    progress: &mut impl Write,
) -> Result<ConvertReport, ConvertError> {
    let mut service = ConvertService::new(DirectoryJournal::new(output_dir.as_ref()));
    service.convert_dir(input_dir.as_ref(), progress)
}

/// Lists regular `*.json` files directly inside `dir` (non-recursive).
pub fn list_note_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == NOTE_FILE_EXTENSION)
        {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{list_note_files, DirectoryJournal, JournalSink};
    use crate::render::daily::DailyEntry;
    use std::fs;

    #[test]
    fn list_note_files_filters_extension_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("b.txt"), "{}").unwrap();
        fs::write(dir.path().join("c.JSON.bak"), "{}").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();
        fs::write(dir.path().join("nested.json").join("d.json"), "{}").unwrap();

        let files = list_note_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.json")]);
    }

    #[test]
    fn directory_journal_creates_then_appends() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = DirectoryJournal::new(dir.path());
        let entry = DailyEntry {
            file_name: "January 1, 2020.md".to_string(),
            markdown: "- Test\n    - Test Body\n".to_string(),
        };

        journal.append(&entry).unwrap();
        let path = dir.path().join(&entry.file_name);
        assert_eq!(fs::read_to_string(&path).unwrap(), entry.markdown);

        journal.append(&entry).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), entry.markdown.repeat(2));
    }
}
