//! Runs the archive filter over `data.json` entries from the command line.

use crate::data::{Entry, EntryCard};
use crate::filter::ArchiveFilter;
use std::io::{self, Write};

/// Writes `{slug}\t{pet_name}` for every entry the archive search shows for
/// `query`, in `entries` order. Returns the number of lines written.
pub fn write_matches<W: Write>(w: &mut W, entries: &[Entry], query: &str) -> io::Result<usize> {
    let mut filter = ArchiveFilter::new(entries.iter().map(EntryCard::new).collect());
    filter.evaluate(query);

    let mut count = 0;
    for card in filter.cards().iter().filter(|c| c.visibility.is_visible()) {
        writeln!(w, "{}\t{}", card.entry.slug, card.entry.pet_name)?;
        count += 1;
    }
    Ok(count)
}

/// Writes `{id}\t{index entry}` for every entry's search index entry.
pub fn write_index<W: Write>(w: &mut W, entries: &[Entry]) -> io::Result<()> {
    let filter = ArchiveFilter::new(entries.iter().map(EntryCard::new).collect());
    for (id, entry) in filter.index().iter() {
        writeln!(w, "{}\t{}", id, entry)?;
    }
    Ok(())
}
