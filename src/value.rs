//! Helpers for building template [`Value`]s. Templates don't escape anything
//! they print, so text goes in through [`Object::text`] (escaped) and only
//! markup we generated ourselves goes in through [`Object::html`].

use crate::text::escape_html;
use gtmpl_value::Value;
use std::collections::HashMap;
use url::Url;

/// A template object under construction.
#[derive(Debug, Default)]
pub struct Object(HashMap<String, Value>);

impl Object {
    pub fn new() -> Object {
        Object::default()
    }

    /// Inserts HTML-escaped text.
    pub fn text(self, key: &str, value: &str) -> Object {
        self.value(key, Value::String(escape_html(value)))
    }

    /// Inserts markup verbatim.
    pub fn html(self, key: &str, value: impl Into<String>) -> Object {
        self.value(key, Value::String(value.into()))
    }

    /// Inserts a URL, escaped for use in an attribute.
    pub fn url(self, key: &str, url: &Url) -> Object {
        self.text(key, url.as_str())
    }

    /// Inserts a URL or `nil`, so templates can test for it with `if`.
    pub fn optional_url(self, key: &str, url: Option<&Url>) -> Object {
        match url {
            Some(url) => self.url(key, url),
            None => self.value(key, Value::Nil),
        }
    }

    pub fn flag(self, key: &str, value: bool) -> Object {
        self.value(key, Value::Bool(value))
    }

    pub fn list(self, key: &str, items: impl IntoIterator<Item = Value>) -> Object {
        self.value(key, Value::Array(items.into_iter().collect()))
    }

    pub fn value(mut self, key: &str, value: Value) -> Object {
        self.0.insert(key.to_owned(), value);
        self
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Value {
        Value::Object(object.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_text_is_escaped_and_html_is_not() {
        let value: Value = Object::new()
            .text("name", "Tom & <Jerry>")
            .html("body", "<p>hi</p>")
            .into();
        match value {
            Value::Object(m) => {
                assert_eq!(
                    Some(&Value::String(String::from("Tom &amp; &lt;Jerry&gt;"))),
                    m.get("name")
                );
                assert_eq!(
                    Some(&Value::String(String::from("<p>hi</p>"))),
                    m.get("body")
                );
            }
            _ => panic!("wanted an object"),
        }
    }

    #[test]
    fn test_optional_url() -> Result<(), url::ParseError> {
        let url = Url::parse("https://example.org/a?b=1&c=2")?;
        let value: Value = Object::new()
            .optional_url("some", Some(&url))
            .optional_url("none", None)
            .into();
        match value {
            Value::Object(m) => {
                assert_eq!(
                    Some(&Value::String(String::from("https://example.org/a?b=1&amp;c=2"))),
                    m.get("some")
                );
                assert_eq!(Some(&Value::Nil), m.get("none"));
            }
            _ => panic!("wanted an object"),
        }
        Ok(())
    }
}
