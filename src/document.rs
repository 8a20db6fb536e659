use crate::errors::{AppError, AppResult};
use crate::extractor::BoundaryExtractor;
use crate::progress::{ProgressEvent, ProgressSink};
use std::fs;
use std::path::Path;

/// The raw input text, read once and held read-only for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    /// Reads the whole file at `path` into memory.
    ///
    /// Reports [`ProgressEvent::ReadStarted`] before touching the file and
    /// [`ProgressEvent::ReadCompleted`] once the text is loaded.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file is missing, unreadable, or not UTF-8.
    pub fn read(path: &Path, progress: &mut dyn ProgressSink) -> AppResult<Self> {
        progress.report(ProgressEvent::ReadStarted {
            path: path.to_path_buf(),
        });
        let text = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        progress.report(ProgressEvent::ReadCompleted {
            path: path.to_path_buf(),
            bytes: text.len(),
        });
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Starts a fresh scan at offset 0.
    pub fn extractor(&self) -> BoundaryExtractor<'_> {
        BoundaryExtractor::new(&self.text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_reports_start_and_size() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "<kml></kml>").unwrap();

        let mut events = Vec::new();
        let doc = Document::read(tmp.path(), &mut |e: ProgressEvent| events.push(e)).unwrap();

        assert_eq!(doc.as_str(), "<kml></kml>");
        assert_eq!(doc.len(), 11);
        assert_eq!(
            events,
            vec![
                ProgressEvent::ReadStarted {
                    path: tmp.path().to_path_buf()
                },
                ProgressEvent::ReadCompleted {
                    path: tmp.path().to_path_buf(),
                    bytes: 11
                },
            ]
        );
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let mut events = Vec::new();
        let result = Document::read(
            Path::new("definitely/not/here.kml"),
            &mut |e: ProgressEvent| events.push(e),
        );

        assert!(matches!(result, Err(AppError::Io { .. })));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn empty_document() {
        let doc = Document::from("");
        assert!(doc.is_empty());
    }
}
