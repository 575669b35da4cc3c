//! Paginates the archive and converts its pages into template values.
//!
//! Page 1 of the archive lives at the archive root (`/pet-tributes/`) and page
//! `n` at `/pet-tributes/page-{n}/`. Each page lists up to `cards_per_page`
//! cards, newest first. Every card carries `data-name`, `data-breed`,
//! `data-years` and `data-content` attributes: these are the fields the
//! in-page search filter indexes (see [`crate::filter`]).

use crate::config::Config;
use crate::data::{Entry, EntryCard};
use crate::filter::Card;
use crate::stone::NameStyle;
use crate::value::Object;
use gtmpl_value::Value;
use std::path::{Path, PathBuf};
use url::{ParseError, Url};

/// The title of the archive's first page.
pub const ARCHIVE_TITLE: &str = "Pet Memorial Tributes";

/// The directory beneath the archive root holding the theme's static assets.
pub const ASSETS_DIRECTORY: &str = "assets";

/// One page of the archive.
#[derive(Debug, Clone, Copy)]
pub struct ArchivePage<'a> {
    /// The 1-based page number.
    pub number: usize,

    /// The total number of pages in the archive.
    pub total: usize,

    pub entries: &'a [Entry],
}

/// Splits `entries` into pages of `per_page` entries. An empty archive still
/// has a (blank) first page.
pub fn paginate(entries: &[Entry], per_page: usize) -> Vec<ArchivePage<'_>> {
    let per_page = per_page.max(1);
    let total = total_pages(entries.len(), per_page);
    if entries.is_empty() {
        return vec![ArchivePage {
            number: 1,
            total,
            entries,
        }];
    }
    entries
        .chunks(per_page)
        .enumerate()
        .map(|(i, chunk)| ArchivePage {
            number: i + 1,
            total,
            entries: chunk,
        })
        .collect()
}

/// The number of pages needed for `count` entries, at least 1.
pub fn total_pages(count: usize, per_page: usize) -> usize {
    let per_page = per_page.max(1);
    match count % per_page {
        0 => (count / per_page).max(1),
        _ => count / per_page + 1,
    }
}

/// The name of the directory holding page `number` (for pages after the
/// first).
pub fn page_directory_name(number: usize) -> String {
    format!("page-{}", number)
}

/// Reports whether `name` is a directory the archive build owns (the assets
/// directory or a `page-{n}` directory) rather than a tribute's.
pub fn is_reserved_directory(name: &str) -> bool {
    if name == ASSETS_DIRECTORY {
        return true;
    }
    match name.strip_prefix("page-") {
        Some(number) => !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// The absolute URL of page `number`.
pub fn page_url(tributes_url: &Url, number: usize) -> Result<Url, ParseError> {
    match number {
        0 | 1 => Ok(tributes_url.clone()),
        n => tributes_url.join(&format!("{}/", page_directory_name(n))),
    }
}

/// The path of page `number` relative to the site root, e.g.,
/// `/pet-tributes/page-2/`.
pub fn page_path(tributes_url: &Url, number: usize) -> Result<String, ParseError> {
    Ok(page_url(tributes_url, number)?.path().to_owned())
}

/// The `index.html` file for page `number`.
pub fn page_file(tributes_output_directory: &Path, number: usize) -> PathBuf {
    match number {
        0 | 1 => tributes_output_directory.join("index.html"),
        n => tributes_output_directory
            .join(page_directory_name(n))
            .join("index.html"),
    }
}

/// A link in the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub href: String,
    pub active: bool,
    pub arrow: bool,
}

/// The pagination bar for page `current` of `total`: a back arrow, every page
/// number, and a forward arrow. Empty when there's only one page.
pub fn pagination(tributes_url: &Url, current: usize, total: usize) -> Result<Vec<PageLink>, ParseError> {
    if total <= 1 {
        return Ok(Vec::new());
    }
    let arrow = |label: &str, number: usize| -> Result<PageLink, ParseError> {
        Ok(PageLink {
            label: label.to_owned(),
            href: page_path(tributes_url, number)?,
            active: false,
            arrow: true,
        })
    };

    let mut links = Vec::with_capacity(total + 2);
    if current > 1 {
        links.push(arrow("←", current - 1)?);
    }
    for number in 1..=total {
        links.push(PageLink {
            label: number.to_string(),
            href: page_path(tributes_url, number)?,
            active: number == current,
            arrow: false,
        });
    }
    if current < total {
        links.push(arrow("→", current + 1)?);
    }
    Ok(links)
}

impl ArchivePage<'_> {
    pub fn title(&self) -> String {
        match self.number {
            1 => ARCHIVE_TITLE.to_owned(),
            n => format!("{} — Page {}", ARCHIVE_TITLE, n),
        }
    }

    /// Converts the page into a template value. See the theme's archive
    /// template for the fields.
    pub fn to_value(&self, config: &Config) -> Result<Value, ParseError> {
        let prev = match self.number > 1 {
            true => Some(page_url(&config.tributes_url, self.number - 1)?),
            false => None,
        };
        let next = match self.number < self.total {
            true => Some(page_url(&config.tributes_url, self.number + 1)?),
            false => None,
        };
        let cards = self
            .entries
            .iter()
            .map(|entry| card_value(config, entry))
            .collect::<Result<Vec<Value>, ParseError>>()?;
        let links = pagination(&config.tributes_url, self.number, self.total)?
            .into_iter()
            .map(|link| {
                Value::from(
                    Object::new()
                        .text("label", &link.label)
                        .text("href", &link.href)
                        .flag("active", link.active)
                        .flag("arrow", link.arrow),
                )
            });

        Ok(Object::new()
            .text("title", &self.title())
            .text("heading", ARCHIVE_TITLE)
            .text("site_name", &config.site_name)
            .url("canonical", &page_url(&config.tributes_url, self.number)?)
            .optional_url("prev", prev.as_ref())
            .optional_url("next", next.as_ref())
            .url("static_url", &config.static_url)
            .text("archive_path", config.tributes_url.path())
            .text("submit_url", &config.submit_url)
            .list("cards", cards)
            .list("pagination", links)
            .into())
    }
}

/// Converts an entry into an archive card value.
fn card_value(config: &Config, entry: &Entry) -> Result<Value, ParseError> {
    let card = EntryCard::new(entry);
    let attribute = |key| card.attribute(key).unwrap_or_default();

    let tribute_path = config.tribute_url(&entry.slug)?.path().to_owned();
    let placeholder = entry.uses_placeholder(&config.placeholder_image);
    let image = match placeholder {
        true => config.placeholder_url()?.path().to_owned(),
        false => format!("{}{}", tribute_path, entry.image_filename),
    };
    let title = match entry.breed.is_empty() {
        true => entry.pet_name.clone(),
        false => format!("{} – {}", entry.pet_name, entry.breed),
    };
    let name_style = match placeholder {
        true => NameStyle::for_name(&entry.pet_name).to_css(),
        false => String::new(),
    };

    Ok(Object::new()
        .text("data_name", attribute("name"))
        .text("data_breed", attribute("breed"))
        .text("data_years", attribute("years"))
        .text("data_content", attribute("content"))
        .text("href", &tribute_path)
        .text("image", &image)
        .text("name", &entry.pet_name)
        .text("title", &title)
        .text("excerpt", &entry.excerpt)
        .text("years", &entry.years_pretty)
        .text("badge", &entry.publish_label())
        .text("attribution", &entry.attribution())
        .flag("placeholder", placeholder)
        .text("name_style", &name_style)
        .into())
}

#[cfg(test)]
mod test {
    use super::*;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry {
                slug: format!("pet-{}", i),
                pet_name: format!("Pet {}", i),
                ..Entry::default()
            })
            .collect()
    }

    fn tributes_url() -> Url {
        Url::parse("https://example.org/pet-tributes/").expect("valid url")
    }

    #[test]
    fn test_paginate() {
        let entries = entries(31);
        let pages = paginate(&entries, 15);
        assert_eq!(3, pages.len());
        assert_eq!(
            vec![(1, 15), (2, 15), (3, 1)],
            pages
                .iter()
                .map(|p| (p.number, p.entries.len()))
                .collect::<Vec<_>>()
        );
        assert!(pages.iter().all(|p| p.total == 3));
        assert_eq!("pet-15", pages[1].entries[0].slug);
    }

    #[test]
    fn test_paginate_exact_and_empty() {
        let entries = entries(30);
        assert_eq!(2, paginate(&entries, 15).len());

        let pages = paginate(&[], 15);
        assert_eq!(1, pages.len());
        assert_eq!(1, pages[0].total);
        assert!(pages[0].entries.is_empty());
    }

    #[test]
    fn test_page_locations() -> Result<(), ParseError> {
        let url = tributes_url();
        assert_eq!("/pet-tributes/", page_path(&url, 1)?);
        assert_eq!("/pet-tributes/page-2/", page_path(&url, 2)?);
        assert_eq!(
            "https://example.org/pet-tributes/page-3/",
            page_url(&url, 3)?.as_str()
        );

        let out = Path::new("/out/pet-tributes");
        assert_eq!(out.join("index.html"), page_file(out, 1));
        assert_eq!(out.join("page-2").join("index.html"), page_file(out, 2));
        Ok(())
    }

    #[test]
    fn test_pagination() -> Result<(), ParseError> {
        let url = tributes_url();
        assert!(pagination(&url, 1, 1)?.is_empty());

        let links = pagination(&url, 2, 3)?;
        let labels: Vec<&str> = links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(vec!["←", "1", "2", "3", "→"], labels);
        assert_eq!("/pet-tributes/", links[0].href);
        assert_eq!("/pet-tributes/page-3/", links[4].href);
        assert_eq!(
            vec![false, false, true, false, false],
            links.iter().map(|l| l.active).collect::<Vec<_>>()
        );

        let first = pagination(&url, 1, 2)?;
        assert_eq!("1", first[0].label);
        assert_eq!("→", first.last().map(|l| l.label.as_str()).unwrap_or_default());

        let last = pagination(&url, 2, 2)?;
        assert_eq!("←", last[0].label);
        assert_eq!("2", last.last().map(|l| l.label.as_str()).unwrap_or_default());
        Ok(())
    }

    #[test]
    fn test_is_reserved_directory() {
        assert!(is_reserved_directory("assets"));
        assert!(is_reserved_directory("page-2"));
        assert!(is_reserved_directory("page-10"));
        assert!(!is_reserved_directory("assets-labrador"));
        assert!(!is_reserved_directory("page-2-tribute"));
        assert!(!is_reserved_directory("page-"));
        assert!(!is_reserved_directory("paige-terrier"));
    }

    #[test]
    fn test_title() {
        let entries = entries(1);
        let page = |number| ArchivePage {
            number,
            total: 2,
            entries: &entries,
        };
        assert_eq!("Pet Memorial Tributes", page(1).title());
        assert_eq!("Pet Memorial Tributes — Page 2", page(2).title());
    }
}
