//! Fixed trait categories in sampling and draw order

use crate::io::error::GenerationError;
use std::fmt;
use std::str::FromStr;

/// Trait slot sampled independently for every token
///
/// Declaration order is the sampling order and the default z-order. Head is
/// drawn before Mouth because Mouth-step rules replay the held Head layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Backdrop colour or scene
    Background,
    /// Body and face fur
    Fur,
    /// Clothing
    Clothes,
    /// Eyes and eyewear
    Eyes,
    /// Hair and headwear
    Head,
    /// Mouth expression
    Mouth,
    /// Accessories drawn last
    Jewelry,
}

impl Category {
    /// Number of categories
    pub const COUNT: usize = 7;

    /// All categories in sampling and draw order
    pub const ORDER: [Self; Self::COUNT] = [
        Self::Background,
        Self::Fur,
        Self::Clothes,
        Self::Eyes,
        Self::Head,
        Self::Mouth,
        Self::Jewelry,
    ];

    /// Position of the category in [`Category::ORDER`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name used in manifests and metadata
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Fur => "Fur",
            Self::Clothes => "Clothes",
            Self::Eyes => "Eyes",
            Self::Head => "Head",
            Self::Mouth => "Mouth",
            Self::Jewelry => "Jewelry",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ORDER
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| GenerationError::UnknownCategory {
                name: s.to_string(),
            })
    }
}
