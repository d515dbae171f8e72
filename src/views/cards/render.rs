// Render facade for cards: re-export the implementation from views::cards::items
// so external code keeps using views::cards::{content_card, display_title}.

pub use crate::views::cards::items::{content_card, display_title};
