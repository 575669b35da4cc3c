//! Sizing for pet names printed on the blank memorial stone shown when a
//! tribute has no photo. Longer names get smaller type so that cards stay
//! consistent across the archive grid.

/// Inline style for a name on a placeholder stone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameStyle {
    /// Font size in pixels.
    pub font_size: u32,
}

impl NameStyle {
    pub const WIDTH: &'static str = "50%";
    pub const MAX_WIDTH: &'static str = "200px";

    /// Picks a style for `name`, measured in characters after trimming.
    pub fn for_name(name: &str) -> NameStyle {
        NameStyle {
            font_size: font_size(name.trim().chars().count()),
        }
    }

    /// Renders the style as a CSS declaration list for a `style` attribute.
    pub fn to_css(&self) -> String {
        format!(
            "width: {}; max-width: {}; font-size: {}px;",
            Self::WIDTH,
            Self::MAX_WIDTH,
            self.font_size
        )
    }
}

fn font_size(len: usize) -> u32 {
    match len {
        0..=4 => 30,
        5..=8 => 28,
        9..=14 => 24,
        15..=20 => 20,
        _ => 18,
    }
}
