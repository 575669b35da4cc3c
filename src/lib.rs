//! The library code for the `tributes` publisher, which maintains a pet
//! memorial archive as static HTML. The work breaks down into three steps:
//!
//! 1. Publishing a submission ([`crate::build::publish`]): its photo becomes a
//!    WebP beside the tribute page, its message is rendered from Markdown, and
//!    the page is templated with its share links and metadata
//!    ([`crate::tribute`]).
//! 2. Recording the tribute in the archive's `data.json` ([`crate::data`]).
//! 3. Rewriting the paginated archive ([`crate::archive`],
//!    [`crate::write`]) and copying the theme's static assets.
//!
//! Archive cards for tributes without a photo show the pet's name on a blank
//! stone, sized by [`crate::stone`]. The archive's search field is driven by
//! the filter in [`crate::filter`], which the `search` command also runs over
//! `data.json` ([`crate::search`]).
//!
//! Archives that predate `data.json` can recover it from their tribute pages
//! with [`crate::migrate`].

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod archive;
pub mod build;
pub mod config;
pub mod data;
pub mod filter;
pub mod message;
pub mod migrate;
pub mod photo;
pub mod search;
pub mod share;
pub mod stone;
pub mod submission;
pub mod text;
pub mod tribute;
pub mod value;
pub mod write;
pub mod years;
