//! Parsing for a pet's dates of life. Submitters may write these in any
//! format; a plain `YYYY-YYYY` span (with any dash and spacing) is normalized
//! and anything else is kept as written.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A span of years, e.g., `2008 – 2019`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearSpan {
    pub start: u16,
    pub end: u16,
}

impl YearSpan {
    /// Strictly parses `2008-2019`, `2008–2019` or `2008 — 2019`.
    pub fn parse(raw: &str) -> Result<YearSpan, Error> {
        static SPAN: OnceLock<Regex> = OnceLock::new();
        let span = SPAN.get_or_init(|| {
            Regex::new(r"^(\d{4})-(\d{4})$").expect("span regex is valid")
        });

        let compact: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '—' | '–' => '-',
                c => c,
            })
            .filter(|c| !c.is_whitespace())
            .collect();
        let captures = span
            .captures(&compact)
            .ok_or_else(|| Error(raw.to_owned()))?;
        let year = |i: usize| captures[i].parse::<u16>().map_err(|_| Error(raw.to_owned()));
        Ok(YearSpan {
            start: year(1)?,
            end: year(2)?,
        })
    }

    /// Extracts a span from the first two four-digit runs in `raw`, if any.
    /// Used for slugs, which shouldn't require a well-formed span.
    pub fn extract(raw: &str) -> Option<YearSpan> {
        static YEAR: OnceLock<Regex> = OnceLock::new();
        let year = YEAR.get_or_init(|| Regex::new(r"\d{4}").expect("year regex is valid"));

        let mut years = year.find_iter(raw).filter_map(|m| m.as_str().parse::<u16>().ok());
        Some(YearSpan {
            start: years.next()?,
            end: years.next()?,
        })
    }

    /// The span as used in slugs: `2008-2019`.
    pub fn slug(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

impl fmt::Display for YearSpan {
    /// Displays the span with an en dash: `2008 – 2019`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}

/// Returns the dates of life as shown on pages: the normalized span when
/// `raw` is a plain span, otherwise `raw` trimmed.
pub fn pretty(raw: &str) -> String {
    match YearSpan::parse(raw) {
        Ok(span) => span.to_string(),
        Err(_) => raw.trim().to_owned(),
    }
}

/// Returned when dates of life aren't a `YYYY-YYYY` span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error(String);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "years must be in the format 2008-2019, got `{}`", self.0)
    }
}

impl std::error::Error for Error {}
