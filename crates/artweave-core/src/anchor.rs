//! The two artworks being compared.
//!
//! Anchors are supplied by the dataset lookup and never change for the
//! lifetime of a comparison job. They are always drawn as fixed-size cards.

use serde::{Deserialize, Serialize};

use crate::diagram::{ARTWORK_A_ID, ARTWORK_B_ID};

/// Which side of the comparison an anchor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorSlot {
    A,
    B,
}

impl AnchorSlot {
    /// Returns the reserved diagram node id for this slot.
    pub fn node_id(self) -> &'static str {
        match self {
            Self::A => ARTWORK_A_ID,
            Self::B => ARTWORK_B_ID,
        }
    }

    /// Returns the literal token narrative text uses for this slot.
    pub fn token(self) -> &'static str {
        match self {
            Self::A => "Artwork A",
            Self::B => "Artwork B",
        }
    }
}

/// Metadata for one artwork, as served by the paintings lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtworkAnchor {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub image_url: String,
}

impl ArtworkAnchor {
    /// Returns the trimmed title, or a placeholder when the dataset has none.
    pub fn display_title(&self) -> &str {
        match self.title.trim() {
            "" => "Unknown title",
            title => title,
        }
    }

    /// Returns the trimmed artist name, or a placeholder when the dataset has none.
    pub fn display_artist(&self) -> &str {
        match self.artist.trim() {
            "" => "Unknown artist",
            artist => artist,
        }
    }

    /// Renders the card label, e.g. `Artwork A — Title, Artist, 1874`.
    pub fn card_label(&self, slot: AnchorSlot) -> String {
        format!(
            "{} — {}, {}, {}",
            slot.token(),
            self.display_title(),
            self.display_artist(),
            self.year
        )
    }
}

/// The pair of anchors for one comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkAnchors {
    a: ArtworkAnchor,
    b: ArtworkAnchor,
}

impl ArtworkAnchors {
    pub fn new(a: ArtworkAnchor, b: ArtworkAnchor) -> Self {
        Self { a, b }
    }

    /// Returns the anchor in the given slot.
    pub fn get(&self, slot: AnchorSlot) -> &ArtworkAnchor {
        match slot {
            AnchorSlot::A => &self.a,
            AnchorSlot::B => &self.b,
        }
    }

    pub fn a(&self) -> &ArtworkAnchor {
        &self.a
    }

    pub fn b(&self) -> &ArtworkAnchor {
        &self.b
    }
}
