//! Defines [`Entry`], the archive's record of a published tribute, and the
//! `data.json` file the archive pages are rebuilt from.

use crate::filter::{Card, Visibility};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The format of [`Entry::published_iso`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A published tribute as recorded in `data.json`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Entry {
    pub slug: String,

    #[serde(default)]
    pub pet_name: String,

    #[serde(default)]
    pub breed: String,

    #[serde(default)]
    pub years_pretty: String,

    #[serde(default)]
    pub excerpt: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub state: String,

    /// The publication date as `YYYY-MM-DD`. ISO dates sort chronologically
    /// as strings.
    #[serde(default)]
    pub published_iso: String,

    /// The photo's file name inside the tribute's directory, or the name of
    /// the placeholder stone image.
    #[serde(default)]
    pub image_filename: String,
}

impl Entry {
    /// The publication month as shown on archive cards, e.g., `Feb 2026`.
    /// Empty when the date is missing or malformed.
    pub fn publish_label(&self) -> String {
        match NaiveDate::parse_from_str(&self.published_iso, DATE_FORMAT) {
            Ok(date) => date.format("%b %Y").to_string(),
            Err(_) => String::new(),
        }
    }

    /// The submitter's first name and state, e.g., `Ann, TX`.
    pub fn attribution(&self) -> String {
        crate::text::join_present(&[&self.first_name, &self.state])
    }

    /// Reports whether the entry has no photo of its own.
    pub fn uses_placeholder(&self, placeholder_image: &str) -> bool {
        self.image_filename.is_empty() || self.image_filename == placeholder_image
    }
}

/// Loads the entries in the data file at `path`. A missing file is an empty
/// archive.
pub fn load(path: &Path) -> Result<Vec<Entry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(Error::Io {
                path: path.to_owned(),
                err,
            })
        }
    };
    serde_json::from_reader(BufReader::new(file)).map_err(|err| Error::Json {
        path: path.to_owned(),
        err,
    })
}

/// Writes `entries` to the data file at `path` as indented JSON.
pub fn save(path: &Path, entries: &[Entry]) -> Result<()> {
    let io_err = |err| Error::Io {
        path: path.to_owned(),
        err,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut w, entries).map_err(|err| Error::Json {
        path: path.to_owned(),
        err,
    })?;
    w.write_all(b"\n").map_err(io_err)?;
    w.flush().map_err(io_err)
}

/// Adds `entry` to `entries`, replacing any entry with the same slug.
pub fn upsert(entries: &mut Vec<Entry>, entry: Entry) {
    entries.retain(|e| e.slug != entry.slug);
    entries.push(entry);
}

/// Sorts entries newest first. Entries published on the same day keep their
/// relative order.
pub fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.published_iso.cmp(&a.published_iso));
}

/// An [`Entry`] viewed as an archive card, exposing the same fields the
/// rendered card's `data-*` attributes carry.
#[derive(Clone, Debug)]
pub struct EntryCard<'a> {
    pub entry: &'a Entry,
    pub visibility: Visibility,
}

impl<'a> EntryCard<'a> {
    pub fn new(entry: &'a Entry) -> EntryCard<'a> {
        EntryCard {
            entry,
            visibility: Visibility::Visible,
        }
    }
}

impl Card for EntryCard<'_> {
    fn attribute(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.entry.pet_name),
            "breed" => Some(&self.entry.breed),
            "years" => Some(&self.entry.years_pretty),
            "content" => Some(&self.entry.excerpt),
            _ => None,
        }
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem reading or writing the data file.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O errors on the data file.
    Io { path: PathBuf, err: std::io::Error },

    /// Returned when the data file isn't a JSON array of entries.
    Json {
        path: PathBuf,
        err: serde_json::Error,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, err } => {
                write!(f, "Accessing data file '{}': {}", path.display(), err)
            }
            Error::Json { path, err } => {
                write!(f, "Parsing data file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { path: _, err } => Some(err),
            Error::Json { path: _, err } => Some(err),
        }
    }
}
