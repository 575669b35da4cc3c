//! Templates and writes archive and tribute pages to disk.

use crate::archive::{page_directory_name, page_file, paginate};
use crate::config::Config;
use crate::data::Entry;
use crate::tribute::TributePage;
use gtmpl::{Context, Template, Value};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Responsible for templating and writing HTML pages to disk.
pub struct Writer<'a> {
    /// The template for archive pages.
    pub archive_template: &'a Template,

    /// The template for tribute pages.
    pub tribute_template: &'a Template,

    pub config: &'a Config,
}

impl Writer<'_> {
    /// Templates a single value and writes the result to `file_path`,
    /// creating its directory if needed.
    fn write_page(&self, template: &Template, value: Value, file_path: &Path) -> Result<()> {
        if let Some(dir) = file_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        template.execute(&mut std::fs::File::create(file_path)?, &Context::from(value)?)?;
        debug!(path = %file_path.display(), "wrote page");
        Ok(())
    }

    /// Writes the tribute page into `{tributes_output_directory}/{slug}/`.
    pub fn write_tribute(&self, slug: &str, page: &TributePage) -> Result<PathBuf> {
        let file_path = self.config.tribute_directory(slug).join("index.html");
        self.write_page(self.tribute_template, page.to_value(self.config), &file_path)?;
        Ok(file_path)
    }

    /// Paginates `entries` (which must already be sorted) and writes every
    /// archive page. Page directories left over from a longer archive are
    /// removed. Returns the number of pages written.
    pub fn write_archive(&self, entries: &[Entry]) -> Result<usize> {
        let pages = paginate(entries, self.config.cards_per_page);
        for page in pages.iter() {
            self.write_page(
                self.archive_template,
                page.to_value(self.config)?,
                &page_file(&self.config.tributes_output_directory, page.number),
            )?;
        }
        remove_stale_pages(&self.config.tributes_output_directory, pages.len())?;
        info!(pages = pages.len(), tributes = entries.len(), "wrote archive");
        Ok(pages.len())
    }
}

// Removes `page-{n}` directories for every `n` past `total`.
fn remove_stale_pages(dir: &Path, total: usize) -> Result<()> {
    let mut number = total + 1;
    loop {
        let stale = dir.join(page_directory_name(number));
        if !stale.is_dir() {
            return Ok(());
        }
        std::fs::remove_dir_all(&stale).map_err(|err| Error::Clean {
            path: stale.clone(),
            err,
        })?;
        debug!(path = %stale.display(), "removed stale archive page");
        number += 1;
    }
}

/// The result of a fallible page-writing operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error building a page URL.
    UrlParse(url::ParseError),

    /// An error removing a stale archive page.
    Clean { path: PathBuf, err: io::Error },

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`].
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Removing stale page '{}': {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::UrlParse(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}
