//! Defines [`Submission`], a tribute as submitted by a pet's owner before it
//! is published. Submissions are read from YAML files or assembled from
//! command-line flags.

use crate::archive::is_reserved_directory;
use crate::text::slugify;
use crate::years::YearSpan;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A tribute submission. Only `pet_name` and `message` are required.
///
/// ```yaml
/// pet_name: Max
/// breed: Labrador
/// years: 2010-2022
/// first_name: Ann
/// state: TX
/// photo: ./max.jpg
/// message: |
///   Max was the best boy.
///
///   He loved the beach.
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Submission {
    pub pet_name: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub breed: String,

    /// The dates of life in any format.
    #[serde(default)]
    pub years: String,

    pub message: String,

    /// The photo to convert for the tribute page. Relative paths are resolved
    /// against the submission file's directory.
    #[serde(default)]
    pub photo: Option<PathBuf>,
}

impl Submission {
    /// Loads a submission from a YAML file.
    pub fn from_file(path: &Path) -> Result<Submission> {
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_owned(),
            err,
        })?;
        let mut submission: Submission = serde_yaml::from_reader(file)?;
        if let (Some(photo), Some(dir)) = (&submission.photo, path.parent()) {
            if photo.is_relative() {
                submission.photo = Some(dir.join(photo));
            }
        }
        Ok(submission.trimmed())
    }

    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(self) -> Submission {
        Submission {
            pet_name: self.pet_name.trim().to_owned(),
            first_name: self.first_name.trim().to_owned(),
            state: self.state.trim().to_owned(),
            breed: self.breed.trim().to_owned(),
            years: self.years.trim().to_owned(),
            message: self.message.trim().to_owned(),
            photo: self.photo,
        }
    }

    /// Checks that the required fields are present.
    pub fn validate(&self) -> Result<()> {
        if self.pet_name.trim().is_empty() {
            return Err(Error::MissingField("pet_name"));
        }
        if self.message.trim().is_empty() {
            return Err(Error::MissingField("message"));
        }
        if slugify(&self.pet_name).is_empty() {
            return Err(Error::EmptySlug(self.pet_name.trim().to_owned()));
        }
        Ok(())
    }

    /// The tribute's slug: the pet name, then the breed and the years of life
    /// when present, e.g., `max-labrador-2010-2022`. Slugs naming a directory
    /// the archive owns (`assets`, `page-2`) get a `-tribute` suffix.
    pub fn slug(&self) -> String {
        let mut parts = vec![slugify(&self.pet_name)];
        if !self.breed.is_empty() {
            parts.push(slugify(&self.breed));
        }
        if let Some(span) = YearSpan::extract(&self.years) {
            parts.push(span.slug());
        }
        let slug = parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<String>>()
            .join("-");
        match is_reserved_directory(&slug) {
            true => format!("{}-tribute", slug),
            false => slug,
        }
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem reading or validating a [`Submission`].
#[derive(Debug)]
pub enum Error {
    /// Returned when a required field is empty.
    MissingField(&'static str),

    /// Returned when the pet name has nothing to build a slug from, e.g.,
    /// `???`.
    EmptySlug(String),

    /// Returned when the submission file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the submission file isn't valid YAML.
    DeserializeYaml(serde_yaml::Error),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingField(field) => {
                write!(f, "missing required field `{}`", field)
            }
            Error::EmptySlug(name) => {
                write!(f, "pet name `{}` has no letters or digits to build a URL from", name)
            }
            Error::Open { path, err } => {
                write!(f, "Opening submission file '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MissingField(_) => None,
            Error::EmptySlug(_) => None,
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn max() -> Submission {
        Submission {
            pet_name: String::from("Max"),
            breed: String::from("Labrador Retriever"),
            years: String::from("2010 – 2022"),
            message: String::from("Best boy."),
            ..Submission::default()
        }
    }

    #[test]
    fn test_slug() {
        assert_eq!("max-labrador-retriever-2010-2022", max().slug());

        let submission = Submission {
            pet_name: String::from("Bella's"),
            years: String::from("sometime in 2015"),
            ..max()
        };
        assert_eq!("bellas-labrador-retriever", submission.slug());

        let submission = Submission {
            breed: String::new(),
            ..max()
        };
        assert_eq!("max-2010-2022", submission.slug());
    }

    #[test]
    fn test_slug_avoids_archive_directories() {
        let submission = Submission {
            pet_name: String::from("Assets"),
            ..Submission::default()
        };
        assert_eq!("assets-tribute", submission.slug());

        let submission = Submission {
            pet_name: String::from("Page 2"),
            ..Submission::default()
        };
        assert_eq!("page-2-tribute", submission.slug());

        let submission = Submission {
            pet_name: String::from("Page"),
            breed: String::from("Beagle"),
            ..Submission::default()
        };
        assert_eq!("page-beagle", submission.slug());
    }

    #[test]
    fn test_validate() {
        assert!(max().validate().is_ok());

        let submission = Submission {
            pet_name: String::from("  "),
            ..max()
        };
        assert!(matches!(
            submission.validate(),
            Err(Error::MissingField("pet_name"))
        ));

        let submission = Submission {
            message: String::new(),
            ..max()
        };
        assert!(matches!(
            submission.validate(),
            Err(Error::MissingField("message"))
        ));

        let submission = Submission {
            pet_name: String::from("???"),
            ..max()
        };
        assert!(matches!(submission.validate(), Err(Error::EmptySlug(_))));
    }

    #[test]
    fn test_from_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("max.yaml");
        std::fs::write(
            &path,
            "pet_name: ' Max '\nbreed: Labrador\nphoto: max.jpg\nmessage: |\n  Best boy.\n\n  Loved the beach.\n",
        )?;

        let submission = Submission::from_file(&path)?;
        assert_eq!("Max", submission.pet_name);
        assert_eq!("Labrador", submission.breed);
        assert_eq!("", submission.state);
        assert_eq!("Best boy.\n\nLoved the beach.", submission.message);
        assert_eq!(Some(dir.path().join("max.jpg")), submission.photo);
        Ok(())
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            Submission::from_file(Path::new("./does/not/exist.yaml")),
            Err(Error::Open { .. })
        ));
    }
}
