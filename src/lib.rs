//! tzkml2json library
//!
//! This crate provides the core functionality for the `tzkml2json` binary.
//! Keep the crate root minimal. Implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The binary turns a timezone boundary KML export into JSON polygons:
//!
//! - [`document`] - Reads the whole input document into memory
//! - [`extractor`] - Scans the document for timezone names and coordinate rings
//! - [`writer`] - Writes records as one combined file or one file per timezone
//! - [`cli`] - Command-line interface orchestrating read, extract and write
//! - [`config`] - Optional TOML settings
//! - [`progress`] - Checkpoint events and the sinks that receive them
//! - [`models`] - Points, rings and timezone records
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use tzkml2json::{config::ConverterConfig, document::Document, errors::AppResult};
//! use tzkml2json::{progress::TracingProgress, writer};
//!
//! # fn example() -> AppResult<()> {
//! let mut progress = TracingProgress;
//! let document = Document::read(Path::new("tz_world.kml"), &mut progress)?;
//! let records = document.extractor().extract_all(&mut progress)?;
//! writer::write_single_file(
//!     &records,
//!     Path::new("tz_world.json"),
//!     &ConverterConfig::default(),
//!     &mut progress,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod document;
pub mod errors;
pub mod extractor;
pub mod models;
pub mod progress;
pub mod writer;
