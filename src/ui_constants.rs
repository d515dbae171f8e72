// Layout constants shared by the grid and the cards.

/// Default card width in logical pixels
pub const CARD_WIDTH: f32 = 320.0;

/// Gap between cards in the grid
pub const CARD_GAP: f32 = 16.0;

/// UI spacing constants
pub mod spacing {
    /// Small spacing (4px)
    pub const SMALL: f32 = 4.0;

    /// Medium spacing (8px)
    pub const MEDIUM: f32 = 8.0;

    /// Extra large spacing (24px)
    pub const XLARGE: f32 = 24.0;
}

/// Card-specific layout constants
pub mod card {
    /// Inner margin of card frame (symmetric)
    pub const INNER_MARGIN: f32 = 8.0;

    /// Border radius of card corners
    pub const ROUNDING: f32 = 8.0;

    /// Space after the cover image
    pub const POST_COVER_GAP: f32 = 12.0;

    /// Metadata plaque rounding
    pub const META_ROUNDING: f32 = 6.0;

    /// Metadata plaque inner margin (horizontal)
    pub const META_MARGIN_H: f32 = 8.0;

    /// Metadata plaque inner margin (vertical)
    pub const META_MARGIN_V: f32 = 6.0;
}
