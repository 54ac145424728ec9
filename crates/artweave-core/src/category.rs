//! Node categorization and the category palette.
//!
//! Every node maps to exactly one [`Category`], and every category maps to a
//! fixed [`PaletteToken`]. Consumers rely on the lookup table itself, so the
//! entries must not be derived from anything else.

use crate::{
    color::Color,
    diagram::{DiagramNode, NodeType},
};

/// Visual category of a non-anchor node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    NicheConnection,
    Artist,
    Teacher,
    Movement,
    Theme,
    Context,
    Other,
}

/// Background, border and text colors for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteToken {
    background: &'static str,
    border: &'static str,
    text: &'static str,
}

impl PaletteToken {
    const fn new(background: &'static str, border: &'static str, text: &'static str) -> Self {
        Self {
            background,
            border,
            text,
        }
    }

    /// Background color as a CSS hex string.
    pub fn background(&self) -> &'static str {
        self.background
    }

    /// Border color as a CSS hex string.
    pub fn border(&self) -> &'static str {
        self.border
    }

    /// Text color as a CSS hex string.
    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn background_color(&self) -> Color {
        Color::new(self.background).expect("palette colors are valid CSS hex strings")
    }

    pub fn border_color(&self) -> Color {
        Color::new(self.border).expect("palette colors are valid CSS hex strings")
    }

    pub fn text_color(&self) -> Color {
        Color::new(self.text).expect("palette colors are valid CSS hex strings")
    }
}

const PALETTE: [(Category, PaletteToken); 7] = [
    (
        Category::NicheConnection,
        PaletteToken::new("#fef3c7", "#d97706", "#78350f"),
    ),
    (
        Category::Artist,
        PaletteToken::new("#dbeafe", "#2563eb", "#1e3a8a"),
    ),
    (
        Category::Teacher,
        PaletteToken::new("#ede9fe", "#7c3aed", "#4c1d95"),
    ),
    (
        Category::Movement,
        PaletteToken::new("#dcfce7", "#16a34a", "#14532d"),
    ),
    (
        Category::Theme,
        PaletteToken::new("#fce7f3", "#db2777", "#831843"),
    ),
    (
        Category::Context,
        PaletteToken::new("#e0f2fe", "#0284c7", "#0c4a6e"),
    ),
    (
        Category::Other,
        PaletteToken::new("#f3f4f6", "#6b7280", "#1f2937"),
    ),
];

impl Category {
    /// All categories, in palette order.
    pub const ALL: [Category; 7] = [
        Category::NicheConnection,
        Category::Artist,
        Category::Teacher,
        Category::Movement,
        Category::Theme,
        Category::Context,
        Category::Other,
    ];

    /// Returns the wire name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NicheConnection => "niche_connection",
            Self::Artist => "artist",
            Self::Teacher => "teacher",
            Self::Movement => "movement",
            Self::Theme => "theme",
            Self::Context => "context",
            Self::Other => "other",
        }
    }

    /// Looks up this category's palette token.
    pub fn palette(self) -> PaletteToken {
        PALETTE
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, token)| *token)
            .unwrap_or(PALETTE[PALETTE.len() - 1].1)
    }
}

/// Classifies a node. The first matching rule wins:
///
/// 1. a categorical node type maps to its own category;
/// 2. otherwise a level-1 node is a niche connection;
/// 3. everything else is [`Category::Other`].
pub fn classify(node: &DiagramNode) -> Category {
    match node.node_type {
        NodeType::NicheConnection => Category::NicheConnection,
        NodeType::Artist => Category::Artist,
        NodeType::Teacher => Category::Teacher,
        NodeType::Movement => Category::Movement,
        NodeType::Theme => Category::Theme,
        NodeType::Context => Category::Context,
        NodeType::Artwork | NodeType::Other if node.level == 1 => Category::NicheConnection,
        NodeType::Artwork | NodeType::Other => Category::Other,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn node(node_type: NodeType, level: u32) -> DiagramNode {
        DiagramNode::new("n", node_type, "label", level)
    }

    #[test]
    fn test_categorical_types_map_to_themselves() {
        assert_eq!(classify(&node(NodeType::Artist, 1)), Category::Artist);
        assert_eq!(classify(&node(NodeType::Teacher, 3)), Category::Teacher);
        assert_eq!(classify(&node(NodeType::Movement, 4)), Category::Movement);
        assert_eq!(classify(&node(NodeType::Theme, 2)), Category::Theme);
        assert_eq!(classify(&node(NodeType::Context, 2)), Category::Context);
        assert_eq!(
            classify(&node(NodeType::NicheConnection, 3)),
            Category::NicheConnection
        );
    }

    #[test]
    fn test_level_one_fallback() {
        assert_eq!(classify(&node(NodeType::Other, 1)), Category::NicheConnection);
        assert_eq!(classify(&node(NodeType::Artwork, 1)), Category::NicheConnection);
    }

    #[test]
    fn test_everything_else_is_other() {
        assert_eq!(classify(&node(NodeType::Other, 2)), Category::Other);
        assert_eq!(classify(&node(NodeType::Artwork, 0)), Category::Other);
    }

    #[test]
    fn test_palette_covers_every_category() {
        let mut backgrounds = HashSet::new();
        for category in Category::ALL {
            let token = category.palette();
            assert_eq!(token.background_color().to_string(), token.background());
            assert_eq!(token.border_color().to_string(), token.border());
            assert_eq!(token.text_color().to_string(), token.text());
            backgrounds.insert(token.background());
        }
        assert_eq!(backgrounds.len(), Category::ALL.len());
    }

    #[test]
    fn test_palette_lookup_is_stable() {
        let token = Category::Artist.palette();
        assert_eq!(token.background(), "#dbeafe");
        assert_eq!(token.border(), "#2563eb");
        assert_eq!(token.text(), "#1e3a8a");
    }
}
