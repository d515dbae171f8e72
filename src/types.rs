use crate::views::nav::LocalizableName;

/// Content section shown in the main view. Each variant is one resource
/// collection on the CMS; everything per-resource hangs off this enum so the
/// fetch path and the card list stay generic.
#[derive(strum::EnumCount, strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Games,
    Movies,
}

impl Section {
    // Mapping to the wp/v2 route segment
    pub fn slug(&self) -> &'static str {
        match self {
            Section::Games => "game",
            Section::Movies => "movie",
        }
    }

    /// Singular label used for fallback card titles, e.g. "Game 42".
    pub fn label(&self) -> &'static str {
        match self {
            Section::Games => "Game",
            Section::Movies => "Movie",
        }
    }
}

impl LocalizableName for Section {
    fn loc_key(&self) -> &'static str {
        match self {
            Section::Games => "section-games",
            Section::Movies => "section-movies",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_match_the_cms_routes() {
        assert_eq!(Section::Games.slug(), "game");
        assert_eq!(Section::Movies.slug(), "movie");
    }

    #[test]
    fn labels_are_singular() {
        assert_eq!(Section::Games.label(), "Game");
        assert_eq!(Section::Movies.label(), "Movie");
    }
}
