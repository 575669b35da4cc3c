//! Exports the high-level operations that produce the site: [`publish`], which
//! turns a [`Submission`] into a tribute page and adds it to the archive, and
//! [`rebuild_archive`], which rewrites the paginated archive from `data.json`
//! and copies the theme's static assets.

use crate::config::Config;
use crate::data::{self, Entry, Error as DataError, DATE_FORMAT};
use crate::message;
use crate::photo::{self, Error as PhotoError};
use crate::submission::{Error as SubmissionError, Submission};
use crate::text::first_sentence;
use crate::tribute::TributePage;
use crate::write::{Error as WriteError, Writer};
use crate::years;
use chrono::NaiveDate;
use gtmpl::Template;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// The templates a build renders with.
pub struct Templates {
    pub archive: Template,
    pub tribute: Template,
}

impl Templates {
    /// Loads and parses the theme's templates.
    pub fn load(config: &Config) -> Result<Templates> {
        Ok(Templates {
            archive: parse_template(config.archive_template.iter())?,
            tribute: parse_template(config.tribute_template.iter())?,
        })
    }

    fn writer<'a>(&'a self, config: &'a Config) -> Writer<'a> {
        Writer {
            archive_template: &self.archive,
            tribute_template: &self.tribute,
            config,
        }
    }
}

/// Publishes `submission` on `date`: converts its photo, writes its tribute
/// page, records it in `data.json` (replacing any tribute with the same slug),
/// and rebuilds the archive. Returns the recorded [`Entry`].
pub fn publish(config: &Config, submission: Submission, date: NaiveDate) -> Result<Entry> {
    let submission = submission.trimmed();
    submission.validate()?;
    let templates = Templates::load(config)?;

    let slug = submission.slug();
    let tribute_directory = config.tribute_directory(&slug);
    std::fs::create_dir_all(&tribute_directory)?;
    info!(%slug, "publishing tribute");

    let image_filename = match &submission.photo {
        Some(photo) => {
            let file_name = format!("{}.webp", slug);
            photo::convert_to_webp(
                photo,
                &tribute_directory.join(&file_name),
                config.photo_max_width,
            )?;
            file_name
        }
        None => config.placeholder_image.clone(),
    };

    let entry = Entry {
        excerpt: first_sentence(&submission.message),
        years_pretty: years::pretty(&submission.years),
        published_iso: date.format(DATE_FORMAT).to_string(),
        image_filename,
        slug,
        pet_name: submission.pet_name,
        breed: submission.breed,
        first_name: submission.first_name,
        state: submission.state,
    };

    let mut message_html = String::new();
    message::to_html(&mut message_html, &submission.message);
    let page = TributePage::new(config, &entry, message_html).map_err(WriteError::from)?;
    let path = templates.writer(config).write_tribute(&entry.slug, &page)?;
    info!(path = %path.display(), "wrote tribute page");

    let mut entries = data::load(&config.data_file)?;
    data::upsert(&mut entries, entry.clone());
    data::save(&config.data_file, &entries)?;

    write_archive(config, &templates, entries)?;
    Ok(entry)
}

/// Rewrites every archive page from `data.json` and refreshes the static
/// assets. Returns the number of archive pages.
pub fn rebuild_archive(config: &Config) -> Result<usize> {
    let templates = Templates::load(config)?;
    let entries = data::load(&config.data_file)?;
    write_archive(config, &templates, entries)
}

pub(crate) fn write_archive(config: &Config, templates: &Templates, mut entries: Vec<Entry>) -> Result<usize> {
    data::sort_newest_first(&mut entries);
    let pages = templates.writer(config).write_archive(&entries)?;

    rmdir(&config.static_output_directory)?;
    copy_dir(&config.static_source_directory, &config.static_output_directory)?;
    Ok(pages)
}

// Copies `src` into `dst` recursively. A missing `src` copies nothing.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        debug!(path = %src.display(), "no static directory");
        return Ok(());
    }
    for result in WalkDir::new(src) {
        let entry = result?;
        // strip_prefix() can't fail; every entry is beneath `src`
        let relative = entry.path().strip_prefix(src).unwrap_or_else(|_| entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// Loads the template file contents, concatenates them, and parses the result
// into a template.
fn parse_template<P: AsRef<Path>>(template_files: impl Iterator<Item = P>) -> Result<Template> {
    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(template_file)
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?
            .read_to_string(&mut contents)?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the site. Errors can be in the submission, the
/// photo, the data file, writing pages, cleaning output directories, parsing
/// template files, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for invalid submissions.
    Submission(SubmissionError),

    /// Returned for errors converting the photo.
    Photo(PhotoError),

    /// Returned for errors reading or writing `data.json`.
    Data(DataError),

    /// Returned for errors writing pages to disk.
    Write(WriteError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for errors walking the static directory.
    WalkDir(walkdir::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Submission(err) => err.fmt(f),
            Error::Photo(err) => err.fmt(f),
            Error::Data(err) => err.fmt(f),
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Submission(err) => Some(err),
            Error::Photo(err) => Some(err),
            Error::Data(err) => Some(err),
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::WalkDir(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<SubmissionError> for Error {
    /// Converts [`SubmissionError`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: SubmissionError) -> Error {
        Error::Submission(err)
    }
}

impl From<PhotoError> for Error {
    /// Converts [`PhotoError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: PhotoError) -> Error {
        Error::Photo(err)
    }
}

impl From<DataError> for Error {
    /// Converts [`DataError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: DataError) -> Error {
        Error::Data(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts [`walkdir::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}
