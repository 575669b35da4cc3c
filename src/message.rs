//! Converts a tribute message into HTML. Messages are Markdown, so blank lines
//! separate paragraphs. Raw HTML in a message is escaped, never passed
//! through.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Renders `message` as HTML, appending the result to `w`.
pub fn to_html(w: &mut String, message: &str) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    html::push_html(w, Parser::new_ext(message, options).map(convert));
}

fn convert_tag(tag: Tag) -> Tag {
    match tag {
        // Message headings start at h3, beneath the page's h1 and subtitle.
        Tag::Heading(level) => Tag::Heading((level + 2).min(6)),
        _ => tag,
    }
}

fn convert(ev: Event) -> Event {
    match ev {
        // Images are dropped; their alt text stays.
        Event::Start(Tag::Image(..)) | Event::End(Tag::Image(..)) => {
            Event::Text(CowStr::Borrowed(""))
        }
        Event::Start(tag) => Event::Start(convert_tag(tag)),
        Event::End(tag) => Event::End(convert_tag(tag)),
        Event::Html(html) => Event::Text(html),
        _ => ev,
    }
}
