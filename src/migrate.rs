//! Recovers `data.json` from tribute pages already on disk, for archives that
//! predate the data file or whose data file was lost.

use crate::archive::is_reserved_directory;
use crate::build::{write_archive, Error, Templates};
use crate::config::Config;
use crate::data::{self, Entry, DATE_FORMAT};
use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

struct Patterns {
    name: Regex,
    subtitle: Regex,
    years: Regex,
    description: Regex,
    origin: Regex,
    date: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |pattern: &str| Regex::new(pattern).expect("migration pattern is valid");
        Patterns {
            name: re(r#"<h1 class="mm-tribute-name">(.*?)</h1>"#),
            subtitle: re(r#"<p class="mm-tribute-subtitle">(.*?)</p>"#),
            years: re(r#"<p class="mm-years">(.*?)</p>"#),
            description: re(r#"<meta name="description" content="(.*?)""#),
            origin: re(r#"<p class="mm-tribute-origin">Shared by (.*?)</p>"#),
            date: re(r#"<meta name="date" content="(.*?)""#),
        }
    })
}

/// Scans the archive directory for tribute pages, rebuilds `data.json` from
/// them, and rewrites the archive. Tributes whose pages carry no publication
/// date are recorded as published on `today`.
pub fn migrate(config: &Config, today: NaiveDate) -> Result<Vec<Entry>, Error> {
    let templates = Templates::load(config)?;

    let mut dirs = Vec::new();
    for result in std::fs::read_dir(&config.tributes_output_directory)? {
        let entry = result?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !entry.file_type()?.is_dir() || is_reserved_directory(&name) {
            continue;
        }
        dirs.push((name, entry.path()));
    }
    dirs.sort();

    let mut entries = Vec::new();
    for (slug, dir) in dirs {
        let index = dir.join("index.html");
        if !index.is_file() {
            debug!(path = %dir.display(), "skipping directory without index.html");
            continue;
        }
        let html = std::fs::read_to_string(&index)?;
        let image_filename = first_webp(&dir)?.unwrap_or_else(|| config.placeholder_image.clone());
        entries.push(entry_from_html(&slug, &html, image_filename, today));
    }
    info!(tributes = entries.len(), "recovered tributes");

    data::save(&config.data_file, &entries)?;
    write_archive(config, &templates, entries.clone())?;
    Ok(entries)
}

/// Extracts an [`Entry`] from a rendered tribute page.
pub fn entry_from_html(slug: &str, html: &str, image_filename: String, today: NaiveDate) -> Entry {
    let p = patterns();
    let capture = |re: &Regex| {
        re.captures(html)
            .map(|c| unescape_html(c[1].trim()))
            .unwrap_or_default()
    };

    let pet_name = match capture(&p.name) {
        name if name.is_empty() => slug.to_owned(),
        name => name,
    };
    let breed = capture(&p.subtitle)
        .replace("Memorial Tribute", "")
        .trim()
        .to_owned();

    let origin = capture(&p.origin);
    let mut parts = origin.splitn(2, ',').map(str::trim);
    let first_name = parts.next().unwrap_or_default().to_owned();
    let state = parts.next().unwrap_or_default().to_owned();

    let published_iso = match NaiveDate::parse_from_str(&capture(&p.date), DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => {
            warn!(%slug, "no publication date; using today");
            today
        }
    }
    .format(DATE_FORMAT)
    .to_string();

    Entry {
        slug: slug.to_owned(),
        pet_name,
        breed,
        years_pretty: capture(&p.years),
        excerpt: capture(&p.description),
        first_name,
        state,
        published_iso,
        image_filename,
    }
}

// Returns the alphabetically first `.webp` file in `dir`, if any.
fn first_webp(dir: &Path) -> std::io::Result<Option<String>> {
    let mut names = Vec::new();
    for result in std::fs::read_dir(dir)? {
        let name = result?.file_name().to_string_lossy().into_owned();
        if name.ends_with(".webp") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names.into_iter().next())
}

// Reverses the escaping applied to page text.
fn unescape_html(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod test {
    use super::*;

    const PAGE: &str = r#"<html><head>
  <meta name="description" content="Tom &amp; Jerry&#39;s friend.">
  <meta name="date" content="2025-11-03">
</head><body>
  <h1 class="mm-tribute-name">Max</h1>
  <p class="mm-tribute-subtitle">Labrador Memorial Tribute</p>
  <p class="mm-years">2010 – 2022</p>
  <p class="mm-tribute-origin">Shared by Ann, TX</p>
</body></html>"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).expect("valid date")
    }

    #[test]
    fn test_entry_from_html() {
        let entry = entry_from_html("max-labrador", PAGE, String::from("max-labrador.webp"), today());
        assert_eq!(
            Entry {
                slug: String::from("max-labrador"),
                pet_name: String::from("Max"),
                breed: String::from("Labrador"),
                years_pretty: String::from("2010 – 2022"),
                excerpt: String::from("Tom & Jerry&#39;s friend."),
                first_name: String::from("Ann"),
                state: String::from("TX"),
                published_iso: String::from("2025-11-03"),
                image_filename: String::from("max-labrador.webp"),
            },
            entry
        );
    }

    #[test]
    fn test_entry_from_sparse_html() {
        let html = r#"<p class="mm-tribute-subtitle">Memorial Tribute</p>
<p class="mm-tribute-origin">Shared by Ann</p>"#;
        let entry = entry_from_html("luna", html, String::from("blank-stone.webp"), today());
        assert_eq!("luna", entry.pet_name);
        assert_eq!("", entry.breed);
        assert_eq!("Ann", entry.first_name);
        assert_eq!("", entry.state);
        assert_eq!("2026-02-01", entry.published_iso);
    }

    #[test]
    fn test_first_webp() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        assert_eq!(None, first_webp(dir.path())?);
        std::fs::write(dir.path().join("index.html"), "")?;
        std::fs::write(dir.path().join("b.webp"), "")?;
        std::fs::write(dir.path().join("a.webp"), "")?;
        assert_eq!(Some(String::from("a.webp")), first_webp(dir.path())?);
        Ok(())
    }
}
