//! The archive filter: keeps the visibility of a fixed collection of tribute
//! cards consistent with the current contents of a search field.
//!
//! A [`SearchIndex`] is computed once when the filter is created. Each card's
//! descriptive fields (see [`FIELD_KEYS`]) are joined with a space and
//! normalized the same way queries are (lower-cased and trimmed). Evaluating a
//! [`Query`] is then a linear scan over the index: a card is visible when the
//! query is empty or is a substring of the card's index entry.
//!
//! The filter receives its cards and its input as parameters (see [`attach`])
//! rather than looking them up, so it can be driven by anything implementing
//! [`Card`] and [`QueryInput`], whether that's a rendered page or a list of
//! archive entries loaded from disk.

use std::fmt;

/// The attribute keys read from each card, in the order they're joined to
/// form the card's index entry.
pub const FIELD_KEYS: [&str; 4] = ["name", "breed", "years", "content"];

/// The display state of a [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Visibility {
        match visible {
            true => Visibility::Visible,
            false => Visibility::Hidden,
        }
    }
}

/// A displayable tribute. Cards expose their descriptive fields as key/value
/// attributes and accept a new display state.
pub trait Card {
    /// Returns the value of the descriptive attribute `key` (one of
    /// [`FIELD_KEYS`]). Missing attributes are treated as empty strings.
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Applies a display state to the card.
    fn set_visibility(&mut self, visibility: Visibility);
}

/// The search field driving a filter.
pub trait QueryInput {
    /// The field's full current text.
    fn value(&self) -> &str;
}

impl QueryInput for str {
    fn value(&self) -> &str {
        self
    }
}

impl QueryInput for String {
    fn value(&self) -> &str {
        self
    }
}

/// Lower-cases and trims `value`. Queries and index entries are normalized
/// identically.
pub fn normalize(value: &str) -> String {
    value.to_lowercase().trim().to_owned()
}

/// A normalized search query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Query {
        Query(normalize(raw))
    }

    /// Empty (or whitespace-only) queries match every card.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether the query matches a card's index entry.
    pub fn matches(&self, entry: &str) -> bool {
        self.is_empty() || entry.contains(&self.0)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies a card by its position in the collection the index was built
/// from.
pub type CardId = usize;

/// The precomputed, normalized text of each card, addressed by [`CardId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<String>,
}

impl SearchIndex {
    /// Builds an index entry for each card in `cards`.
    pub fn build<'a, C, I>(cards: I) -> SearchIndex
    where
        C: Card + ?Sized + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        SearchIndex {
            entries: cards.into_iter().map(index_entry).collect(),
        }
    }

    pub fn get(&self, id: CardId) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(CardId, entry)` pairs in card order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &str)> {
        self.entries.iter().map(String::as_str).enumerate()
    }

    /// Returns the visibility each card would have for `query`, in card
    /// order.
    pub fn evaluate<'a>(&'a self, query: &'a Query) -> impl Iterator<Item = Visibility> + 'a {
        self.entries
            .iter()
            .map(move |entry| Visibility::from(query.matches(entry)))
    }
}

/// Computes the index entry for a single card.
pub fn index_entry<C: Card + ?Sized>(card: &C) -> String {
    let joined = FIELD_KEYS
        .iter()
        .map(|key| card.attribute(key).unwrap_or_default())
        .collect::<Vec<&str>>()
        .join(" ");
    normalize(&joined)
}

/// Maintains the visibility of a fixed collection of cards. Cards are neither
/// added nor removed after construction; only their display state changes.
pub struct ArchiveFilter<C> {
    cards: Vec<C>,
    index: SearchIndex,
}

impl<C: Card> ArchiveFilter<C> {
    /// Creates a filter over `cards`, computing the search index once. An
    /// empty collection yields a filter whose evaluations do nothing.
    pub fn new(cards: Vec<C>) -> ArchiveFilter<C> {
        let index = SearchIndex::build(cards.iter());
        ArchiveFilter { cards, index }
    }

    /// Updates every card's display state for `raw_query`. Never fails and
    /// is idempotent.
    pub fn evaluate(&mut self, raw_query: &str) {
        let query = Query::new(raw_query);
        for (card, visibility) in self.cards.iter_mut().zip(self.index.evaluate(&query)) {
            card.set_visibility(visibility);
        }
    }

    /// Handles a change notification from the search field by evaluating its
    /// full current value.
    pub fn on_input<I: QueryInput + ?Sized>(&mut self, input: &I) {
        self.evaluate(input.value());
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn cards(&self) -> &[C] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<C> {
        self.cards
    }
}

impl<C> fmt::Debug for ArchiveFilter<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ArchiveFilter")
            .field("index", &self.index)
            .finish()
    }
}

/// Initializes a filter from an optional search field and a card collection,
/// applying the field's current value. Returns `None` (an inert component)
/// when the field is missing or there are no cards.
pub fn attach<I, C>(input: Option<&I>, cards: Vec<C>) -> Option<ArchiveFilter<C>>
where
    I: QueryInput + ?Sized,
    C: Card,
{
    let input = input?;
    if cards.is_empty() {
        return None;
    }
    let mut filter = ArchiveFilter::new(cards);
    filter.on_input(input);
    Some(filter)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct TestCard {
        attributes: HashMap<&'static str, &'static str>,
        visibility: Visibility,
    }

    impl TestCard {
        fn new(attributes: &[(&'static str, &'static str)]) -> TestCard {
            TestCard {
                attributes: attributes.iter().cloned().collect(),
                visibility: Visibility::Visible,
            }
        }
    }

    impl Card for TestCard {
        fn attribute(&self, key: &str) -> Option<&str> {
            self.attributes.get(key).copied()
        }

        fn set_visibility(&mut self, visibility: Visibility) {
            self.visibility = visibility;
        }
    }

    fn visibilities(filter: &ArchiveFilter<TestCard>) -> Vec<bool> {
        filter
            .cards()
            .iter()
            .map(|c| c.visibility.is_visible())
            .collect()
    }

    fn max() -> TestCard {
        TestCard::new(&[
            ("name", "Max"),
            ("breed", "Labrador"),
            ("years", "2010-2022"),
            ("content", "best boy"),
        ])
    }

    fn bella_and_max() -> ArchiveFilter<TestCard> {
        ArchiveFilter::new(vec![
            TestCard::new(&[("name", "Bella")]),
            TestCard::new(&[("name", "Max")]),
        ])
    }

    #[test]
    fn test_index_entry_joins_normalized_fields() {
        assert_eq!("max labrador 2010-2022 best boy", index_entry(&max()));
    }

    #[test]
    fn test_index_entry_missing_fields_are_empty() {
        let card = TestCard::new(&[("name", "  Luna "), ("content", "Sweet")]);
        assert_eq!("luna    sweet", index_entry(&card));

        let card = TestCard::new(&[]);
        assert_eq!("", index_entry(&card));
    }

    #[test]
    fn test_scenario() {
        let mut filter = bella_and_max();

        filter.evaluate("bel");
        assert_eq!(vec![true, false], visibilities(&filter));

        filter.evaluate("");
        assert_eq!(vec![true, true], visibilities(&filter));

        filter.evaluate("zz");
        assert_eq!(vec![false, false], visibilities(&filter));
    }

    #[test]
    fn test_substring_containment() {
        let mut filter = ArchiveFilter::new(vec![max()]);

        filter.evaluate("brador");
        assert_eq!(vec![true], visibilities(&filter));

        filter.evaluate("xyz");
        assert_eq!(vec![false], visibilities(&filter));

        // Mid-word matches are allowed; this is not word-prefix matching.
        filter.evaluate("ax");
        assert_eq!(vec![true], visibilities(&filter));

        // Matches may span the separator between two fields.
        filter.evaluate("labrador 2010");
        assert_eq!(vec![true], visibilities(&filter));
    }

    #[test]
    fn test_whitespace_query_shows_everything() {
        let mut filter = bella_and_max();
        filter.evaluate("zz");
        filter.evaluate("   \t ");
        assert_eq!(vec![true, true], visibilities(&filter));
    }

    #[test]
    fn test_case_insensitive() {
        let mut upper = bella_and_max();
        let mut lower = bella_and_max();
        upper.evaluate("  BELLA ");
        lower.evaluate("bella");
        assert_eq!(visibilities(&upper), visibilities(&lower));
        assert_eq!(vec![true, false], visibilities(&upper));
    }

    #[test]
    fn test_idempotent() {
        let mut filter = bella_and_max();
        filter.evaluate("a");
        let once = visibilities(&filter);
        filter.evaluate("a");
        assert_eq!(once, visibilities(&filter));
    }

    #[test]
    fn test_full_name_never_hides_its_card() {
        let mut filter = ArchiveFilter::new(vec![
            max(),
            TestCard::new(&[("name", "Sir Barks-a-Lot"), ("breed", "Beagle")]),
            TestCard::new(&[("name", "Zoë"), ("years", "2001 – 2015")]),
        ]);
        let names = ["Max", "Sir Barks-a-Lot", "Zoë"];
        for (i, name) in names.iter().enumerate() {
            filter.evaluate(name);
            assert!(filter.cards()[i].visibility.is_visible(), "{}", name);
        }
    }

    #[test]
    fn test_total_over_odd_input() {
        let mut filter = bella_and_max();
        for query in &["(", "*.?", "🐾", "\\", "\u{0}", "bella\nmax"] {
            filter.evaluate(query);
        }
        assert_eq!(vec![false, false], visibilities(&filter));
    }

    #[test]
    fn test_index_is_inspectable() {
        let filter = bella_and_max();
        assert_eq!(2, filter.index().len());
        assert_eq!(Some("bella"), filter.index().get(0));
        assert_eq!(Some("max"), filter.index().get(1));
        assert_eq!(None, filter.index().get(2));
        assert_eq!(
            vec![(0, "bella"), (1, "max")],
            filter.index().iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_attach() {
        let input = String::from("max");
        let filter = attach(Some(&input), vec![max(), TestCard::new(&[("name", "Bella")])]);
        let filter = filter.expect("filter should attach");
        assert_eq!(vec![true, false], visibilities(&filter));
    }

    #[test]
    fn test_attach_is_inert_without_input_or_cards() {
        assert!(attach::<str, TestCard>(None, vec![max()]).is_none());
        assert!(attach::<str, TestCard>(Some("max"), Vec::new()).is_none());
    }

    #[test]
    fn test_on_input_uses_full_value() {
        let mut filter = bella_and_max();
        filter.on_input("b");
        filter.on_input("be");
        filter.on_input("bel");
        assert_eq!(vec![true, false], visibilities(&filter));
    }
}
