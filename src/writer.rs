use crate::config::ConverterConfig;
use crate::constants::{OUTPUT_EXTENSION, PATH_SEPARATOR_REPLACEMENT};
use crate::errors::{AppError, AppResult};
use crate::models::TimezoneRecord;
use crate::progress::{ProgressEvent, ProgressSink};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes every record, in extraction order, as one JSON array.
///
/// # Errors
///
/// Returns `AppError::Io` if the destination cannot be created or written,
/// and `AppError::Serialize` if encoding fails midway.
pub fn write_single_file(
    records: &[TimezoneRecord],
    destination: &Path,
    config: &ConverterConfig,
    progress: &mut dyn ProgressSink,
) -> AppResult<()> {
    if config.create_output_dir {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }
    }

    write_json(records, destination, config.pretty)?;
    progress.report(ProgressEvent::FileWritten {
        path: destination.to_path_buf(),
        records: records.len(),
    });
    Ok(())
}

/// Writes one JSON file per timezone name into `destination_dir`.
///
/// Files are written in sorted name order; each holds that timezone's records
/// in extraction order. A failure stops the batch but leaves files already
/// written in place.
///
/// Returns the paths written.
///
/// # Example
///
/// ```no_run
/// use tzkml2json::config::ConverterConfig;
/// use tzkml2json::progress::TracingProgress;
/// use tzkml2json::writer;
/// use std::path::Path;
///
/// # fn main() -> Result<(), tzkml2json::errors::AppError> {
/// let written = writer::write_grouped_files(
///     &[],
///     Path::new("out/zones"),
///     &ConverterConfig::default(),
///     &mut TracingProgress,
/// )?;
/// assert!(written.is_empty());
/// # Ok(())
/// # }
/// ```
pub fn write_grouped_files(
    records: &[TimezoneRecord],
    destination_dir: &Path,
    config: &ConverterConfig,
    progress: &mut dyn ProgressSink,
) -> AppResult<Vec<PathBuf>> {
    if config.create_output_dir {
        fs::create_dir_all(destination_dir).map_err(|e| AppError::io(destination_dir, e))?;
    }

    let groups = group_by_name(records);
    debug!(timezones = groups.len(), "Grouped records by name");

    let mut written = Vec::with_capacity(groups.len());
    for (name, group) in groups {
        let path = destination_dir.join(output_file_name(name));
        write_json(&group, &path, config.pretty)?;
        progress.report(ProgressEvent::FileWritten {
            path: path.clone(),
            records: group.len(),
        });
        written.push(path);
    }
    Ok(written)
}

/// Groups records by timezone name.
///
/// Groups iterate in sorted name order. Within a group, records keep their
/// relative extraction order.
pub fn group_by_name(records: &[TimezoneRecord]) -> BTreeMap<&str, Vec<&TimezoneRecord>> {
    let mut groups: BTreeMap<&str, Vec<&TimezoneRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.name.as_str()).or_default().push(record);
    }
    groups
}

/// `America/New_York` becomes `America_New_York.json`.
pub fn output_file_name(name: &str) -> String {
    format!(
        "{}.{OUTPUT_EXTENSION}",
        name.replace('/', PATH_SEPARATOR_REPLACEMENT)
    )
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path, pretty: bool) -> AppResult<()> {
    let file = File::create(path).map_err(|e| AppError::io(path, e))?;
    let mut out = BufWriter::new(file);

    let encoded = if pretty {
        serde_json::to_writer_pretty(&mut out, value)
    } else {
        serde_json::to_writer(&mut out, value)
    };
    encoded.map_err(|e| AppError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    out.flush().map_err(|e| AppError::io(path, e))
}
