//! Builds the social share links shown on each tribute page: Facebook,
//! Pinterest, email, and the payload handed to the platform's native share
//! sheet when one is available.

use serde::Serialize;
use url::{form_urlencoded, Url};

const FACEBOOK_SHARER: &str = "https://www.facebook.com/sharer/sharer.php";
const PINTEREST_PIN: &str = "https://pinterest.com/pin/create/button/";
const EMAIL_SUBJECT: &str = "Memorial Tribute";

/// The outbound share links for a tribute page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLinks {
    pub facebook: String,
    pub pinterest: String,
    pub email: String,

    /// JSON-encoded [`SharePayload`] for the native share button.
    pub native: String,
}

/// The data passed to a platform share capability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareLinks {
    /// Builds share links for the page at `page_url`. `image_url` is the
    /// absolute URL of the tribute photo, `description` is the page's meta
    /// description, and `excerpt` is used as the Pinterest pin description.
    pub fn new(
        title: &str,
        page_url: &Url,
        image_url: &Url,
        description: &str,
        excerpt: &str,
    ) -> ShareLinks {
        let page = page_url.as_str();
        let payload = SharePayload {
            title: title.to_owned(),
            text: description.to_owned(),
            url: page.to_owned(),
        };
        ShareLinks {
            facebook: format!("{}?u={}", FACEBOOK_SHARER, encode(page)),
            pinterest: format!(
                "{}?url={}&media={}&description={}",
                PINTEREST_PIN,
                encode(page),
                encode(image_url.as_str()),
                encode(excerpt),
            ),
            email: format!(
                "mailto:?subject={}&body={}",
                encode(EMAIL_SUBJECT),
                encode(page)
            ),
            // Serializing a struct of strings can't fail.
            native: serde_json::to_string(&payload).unwrap_or_default(),
        }
    }
}

/// Percent-encodes a query component. Spaces become `%20` rather than `+`
/// since mail clients don't decode the latter in `mailto:` links.
pub fn encode(component: &str) -> String {
    form_urlencoded::byte_serialize(component.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod test {
    use super::*;

    fn links() -> Result<ShareLinks, url::ParseError> {
        Ok(ShareLinks::new(
            "Max – Labrador Memorial Tribute",
            &Url::parse("https://example.org/pet-tributes/max-labrador/")?,
            &Url::parse("https://example.org/pet-tributes/max-labrador/max-labrador.webp")?,
            "Max was the best boy.",
            "Max was the best boy.",
        ))
    }

    #[test]
    fn test_facebook() -> Result<(), url::ParseError> {
        assert_eq!(
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fexample.org%2Fpet-tributes%2Fmax-labrador%2F",
            links()?.facebook
        );
        Ok(())
    }

    #[test]
    fn test_pinterest() -> Result<(), url::ParseError> {
        assert_eq!(
            "https://pinterest.com/pin/create/button/\
             ?url=https%3A%2F%2Fexample.org%2Fpet-tributes%2Fmax-labrador%2F\
             &media=https%3A%2F%2Fexample.org%2Fpet-tributes%2Fmax-labrador%2Fmax-labrador.webp\
             &description=Max%20was%20the%20best%20boy.",
            links()?.pinterest
        );
        Ok(())
    }

    #[test]
    fn test_email() -> Result<(), url::ParseError> {
        assert_eq!(
            "mailto:?subject=Memorial%20Tribute&body=https%3A%2F%2Fexample.org%2Fpet-tributes%2Fmax-labrador%2F",
            links()?.email
        );
        Ok(())
    }

    #[test]
    fn test_native_payload() -> Result<(), Box<dyn std::error::Error>> {
        let payload: serde_json::Value = serde_json::from_str(&links()?.native)?;
        assert_eq!("Max – Labrador Memorial Tribute", payload["title"]);
        assert_eq!("Max was the best boy.", payload["text"]);
        assert_eq!("https://example.org/pet-tributes/max-labrador/", payload["url"]);
        Ok(())
    }

    #[test]
    fn test_encode_keeps_literal_plus() {
        assert_eq!("a%2Bb%20c%26d", encode("a+b c&d"));
    }
}
