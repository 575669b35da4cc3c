//! Loads the project configuration: `tributes.yaml` in the project root and
//! `theme/theme.yaml` in the theme directory.

use crate::archive::ASSETS_DIRECTORY;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "tributes.yaml";

#[derive(Deserialize)]
struct CardsPerPage(usize);
impl Default for CardsPerPage {
    fn default() -> Self {
        CardsPerPage(15)
    }
}

#[derive(Deserialize)]
struct PhotoMaxWidth(u32);
impl Default for PhotoMaxWidth {
    fn default() -> Self {
        PhotoMaxWidth(1200)
    }
}

#[derive(Deserialize)]
struct Project {
    pub site_name: String,
    pub site_root: Url,

    #[serde(default = "default_tributes_path")]
    pub tributes_path: String,

    #[serde(default = "default_submit_url")]
    pub submit_url: String,

    #[serde(default)]
    pub shop_url: Option<String>,

    #[serde(default)]
    pub cards_per_page: CardsPerPage,

    #[serde(default)]
    pub photo_max_width: PhotoMaxWidth,

    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

fn default_tributes_path() -> String {
    String::from("pet-tributes/")
}

fn default_submit_url() -> String {
    String::from("/submit-a-tribute/")
}

fn default_placeholder_image() -> String {
    String::from("blank-stone.webp")
}

#[derive(Deserialize)]
struct Theme {
    archive_template: Vec<PathBuf>,
    tribute_template: Vec<PathBuf>,
}

/// The resolved configuration for a project.
#[derive(Clone, Debug)]
pub struct Config {
    /// The organization name used in page metadata.
    pub site_name: String,

    /// The absolute URL of the site, e.g., `https://example.org/`.
    pub site_root: Url,

    /// The absolute URL of the archive, e.g.,
    /// `https://example.org/pet-tributes/`. Tribute pages live beneath it at
    /// `{tributes_url}{slug}/`.
    pub tributes_url: Url,

    /// The URL of the theme's static assets, `{tributes_url}assets/`.
    pub static_url: Url,

    /// The link for "Create a Tribute" buttons.
    pub submit_url: String,

    /// The link for the "Explore Memorial Stones" button, if any.
    pub shop_url: Option<String>,

    pub archive_template: Vec<PathBuf>,
    pub tribute_template: Vec<PathBuf>,

    /// The theme's `static` directory.
    pub static_source_directory: PathBuf,

    /// The directory the archive is written to. Tribute directories, archive
    /// pages and the data file all live here.
    pub tributes_output_directory: PathBuf,

    /// The directory the theme's static assets are copied into.
    pub static_output_directory: PathBuf,

    /// The archive's `data.json`.
    pub data_file: PathBuf,

    pub cards_per_page: usize,
    pub photo_max_width: u32,

    /// The file name of the stone image shown for tributes without a photo.
    /// It's expected among the theme's static assets.
    pub placeholder_image: String,
}

impl Config {
    /// Searches `dir` and its ancestors for a `tributes.yaml` file and loads
    /// it with [`Config::from_project_file`].
    pub fn from_directory(dir: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            match Config::from_project_file(&path, output_directory) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    /// Loads the project file at `path` and the theme beside it. The output
    /// directory defaults to `{project_root}/output`.
    pub fn from_project_file(path: &Path, output_directory: Option<&Path>) -> Result<Config> {
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;

        let theme_dir = project_root.join("theme");
        let theme: Theme = serde_yaml::from_reader(open(&theme_dir.join("theme.yaml"), "theme")?)?;

        let tributes_path = match project.tributes_path.ends_with('/') {
            true => project.tributes_path,
            false => format!("{}/", project.tributes_path),
        };
        let tributes_url = project.site_root.join(&tributes_path)?;
        let output_directory = match output_directory {
            Some(dir) => dir.to_owned(),
            None => project_root.join("output"),
        };
        let tributes_output_directory =
            output_directory.join(tributes_path.trim_matches('/'));

        Ok(Config {
            site_name: project.site_name,
            static_url: tributes_url.join(&format!("{}/", ASSETS_DIRECTORY))?,
            tributes_url,
            site_root: project.site_root,
            submit_url: project.submit_url,
            shop_url: project.shop_url,
            archive_template: theme
                .archive_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            tribute_template: theme
                .tribute_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            static_source_directory: theme_dir.join("static"),
            static_output_directory: tributes_output_directory.join(ASSETS_DIRECTORY),
            data_file: tributes_output_directory.join("data.json"),
            tributes_output_directory,
            cards_per_page: match project.cards_per_page.0 {
                0 => return Err(anyhow!("`cards_per_page` must be at least 1")),
                n => n,
            },
            photo_max_width: project.photo_max_width.0,
            placeholder_image: project.placeholder_image,
        })
    }

    /// The absolute URL of the tribute page for `slug`.
    pub fn tribute_url(&self, slug: &str) -> std::result::Result<Url, url::ParseError> {
        self.tributes_url.join(&format!("{}/", slug))
    }

    /// The directory the tribute page for `slug` is written to.
    pub fn tribute_directory(&self, slug: &str) -> PathBuf {
        self.tributes_output_directory.join(slug)
    }

    /// The absolute URL of the placeholder stone image.
    pub fn placeholder_url(&self) -> std::result::Result<Url, url::ParseError> {
        self.static_url.join(&self.placeholder_image)
    }
}

fn open(path: &Path, kind: &str) -> Result<File> {
    File::open(path).map_err(|e| anyhow!("Opening {} file `{}`: {}", kind, path.display(), e))
}
