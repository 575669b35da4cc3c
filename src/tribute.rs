//! Builds the single tribute page: its metadata (canonical URL, Open Graph,
//! Twitter card and JSON-LD), its photo, the rendered message and the share
//! links.

use crate::config::Config;
use crate::data::Entry;
use crate::share::ShareLinks;
use crate::text::{join_present, meta_description};
use crate::value::Object;
use gtmpl_value::Value;
use serde_json::json;
use url::{ParseError, Url};

/// A tribute page ready to be templated.
#[derive(Clone, Debug)]
pub struct TributePage {
    pub pet_name: String,

    /// e.g., `Max – Labrador Memorial Tribute`.
    pub title: String,

    /// e.g., `Labrador Memorial Tribute`.
    pub subtitle: String,

    /// The `<meta name="description">` text.
    pub description: String,

    /// The Open Graph and Twitter description.
    pub og_description: String,

    pub canonical: Url,

    /// The photo's `src`: the file name when the photo sits beside the page,
    /// otherwise the placeholder's absolute URL.
    pub image_src: String,

    /// The photo's absolute URL for link previews.
    pub og_image: Url,

    pub published_iso: String,
    pub years: String,

    /// `Shared by {first_name}, {state}`, or empty.
    pub submitter: String,

    /// The rendered message.
    pub message_html: String,

    pub share: ShareLinks,
}

impl TributePage {
    /// Builds the page for `entry` with its rendered message.
    pub fn new(config: &Config, entry: &Entry, message_html: String) -> Result<TributePage, ParseError> {
        let name = entry.pet_name.as_str();
        let breed = entry.breed.trim();
        let (title, subtitle) = match breed.is_empty() {
            true => (
                format!("{} – Memorial Tribute", name),
                String::from("Memorial Tribute"),
            ),
            false => (
                format!("{} – {} Memorial Tribute", name, breed),
                format!("{} Memorial Tribute", breed),
            ),
        };
        let description = meta_description(&entry.excerpt, name);
        let og_description = match entry.excerpt.is_empty() {
            true => format!("Read the memorial tribute honoring {}.", name),
            false => entry.excerpt.clone(),
        };

        let canonical = config.tribute_url(&entry.slug)?;
        let (image_src, og_image) = match entry.uses_placeholder(&config.placeholder_image) {
            true => {
                let placeholder = config.placeholder_url()?;
                (placeholder.to_string(), placeholder)
            }
            false => (
                entry.image_filename.clone(),
                canonical.join(&entry.image_filename)?,
            ),
        };

        let submitter = match join_present(&[&entry.first_name, &entry.state]) {
            line if line.is_empty() => line,
            line => format!("Shared by {}", line),
        };

        let share = ShareLinks::new(&title, &canonical, &og_image, &description, &entry.excerpt);
        Ok(TributePage {
            pet_name: name.to_owned(),
            title,
            subtitle,
            description,
            og_description,
            canonical,
            image_src,
            og_image,
            published_iso: entry.published_iso.clone(),
            years: entry.years_pretty.clone(),
            submitter,
            message_html,
            share,
        })
    }

    /// The schema.org `Article` describing the page, serialized for a
    /// `<script type="application/ld+json">` element.
    pub fn json_ld(&self, site_name: &str) -> String {
        let organization = json!({
            "@type": "Organization",
            "name": site_name,
        });
        let article = json!({
            "@context": "https://schema.org",
            "@type": "Article",
            "mainEntityOfPage": {
                "@type": "WebPage",
                "@id": self.canonical.as_str(),
            },
            "headline": self.title,
            "image": [self.og_image.as_str()],
            "datePublished": self.published_iso,
            "dateModified": self.published_iso,
            "author": organization,
            "publisher": organization,
            "description": self.description,
        });
        // `</` can't appear inside a script element.
        serde_json::to_string_pretty(&article)
            .unwrap_or_default()
            .replace("</", "<\\/")
    }

    /// Converts the page into a template value. See the theme's tribute
    /// template for the fields.
    pub fn to_value(&self, config: &Config) -> Value {
        let share = Object::new()
            .text("facebook", &self.share.facebook)
            .text("pinterest", &self.share.pinterest)
            .text("email", &self.share.email)
            .text("native", &self.share.native);

        Object::new()
            .text("pet_name", &self.pet_name)
            .text("title", &self.title)
            .text("subtitle", &self.subtitle)
            .text("description", &self.description)
            .text("og_description", &self.og_description)
            .url("canonical", &self.canonical)
            .text("image_src", &self.image_src)
            .url("og_image", &self.og_image)
            .text("published_iso", &self.published_iso)
            .text("years", &self.years)
            .text("submitter", &self.submitter)
            .html("message", self.message_html.clone())
            .html("json_ld", self.json_ld(&config.site_name))
            .value("share", share.into())
            .text("site_name", &config.site_name)
            .url("static_url", &config.static_url)
            .text("archive_path", config.tributes_url.path())
            .text("shop_url", config.shop_url.as_deref().unwrap_or_default())
            .into()
    }
}
