//! Derives the feature set of a trait assignment
//!
//! All knowledge about what trait names mean visually lives in the two tables
//! below. Adding a conflict means adding a row here and a rule in the rule
//! book; the compositor itself never inspects trait names.

use crate::catalog::category::Category;
use crate::features::flags::{Feature, FeatureSet};
use crate::sampling::assembler::{Trait, TraitAssignment};

/// How a trait value is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Value equals the name
    Exact(&'static str),
    /// Value contains `needle` and is not `except`
    Contains {
        /// Substring to look for
        needle: &'static str,
        /// Value excluded even though it contains the needle
        except: Option<&'static str>,
    },
}

impl Pattern {
    /// Test a trait value against the pattern
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Exact(name) => value == name,
            Self::Contains { needle, except } => {
                value.contains(needle) && except.is_none_or(|excluded| value != excluded)
            }
        }
    }
}

/// One row of the trait match table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitMatch {
    /// Feature set when the row matches
    pub feature: Feature,
    /// Category the trait must belong to; `None` matches any category
    pub category: Option<Category>,
    /// Value pattern
    pub pattern: Pattern,
}

impl TraitMatch {
    const fn any(feature: Feature, name: &'static str) -> Self {
        Self {
            feature,
            category: None,
            pattern: Pattern::Exact(name),
        }
    }

    const fn within(feature: Feature, category: Category, name: &'static str) -> Self {
        Self {
            feature,
            category: Some(category),
            pattern: Pattern::Exact(name),
        }
    }

    /// Test one trait against the row
    pub fn matches(&self, binding: &Trait) -> bool {
        self.category
            .is_none_or(|category| category == binding.category())
            && self.pattern.matches(binding.value())
    }
}

/// Trait-derived features
pub const TRAIT_MATCHES: &[TraitMatch] = &[
    TraitMatch::any(Feature::Lasers, "ETH Lasers"),
    TraitMatch::any(Feature::Robot, "Robot"),
    TraitMatch {
        feature: Feature::Goggles,
        category: None,
        pattern: Pattern::Contains {
            needle: "Goggles",
            except: None,
        },
    },
    TraitMatch::any(Feature::TwoToneBraids, "Two Tone Braids"),
    TraitMatch::any(Feature::Dreadlocks, "Dreadlocks"),
    TraitMatch::any(Feature::MessyHair, "Messy Hair"),
    TraitMatch::any(Feature::BlondeBraids, "Blonde Braids"),
    TraitMatch::any(Feature::TrooperHat, "Trooper Hat"),
    TraitMatch {
        feature: Feature::Grin,
        category: None,
        pattern: Pattern::Contains {
            needle: "Grin",
            except: Some("Small Grin"),
        },
    },
    TraitMatch::any(Feature::SmallGrin, "Small Grin"),
    TraitMatch {
        feature: Feature::Bored,
        category: Some(Category::Mouth),
        pattern: Pattern::Contains {
            needle: "Bored",
            except: Some("Bored Unshaven"),
        },
    },
    TraitMatch::within(Feature::BoredUnshaven, Category::Mouth, "Bored Unshaven"),
    TraitMatch::any(Feature::Phoneme, "Phoneme Vuh"),
    TraitMatch::any(Feature::Discomfort, "Discomfort"),
    TraitMatch::any(Feature::ArmyHelmet, "Army Helmet"),
    TraitMatch::any(Feature::Joint, "Bored Joint"),
    TraitMatch::any(Feature::BackwardsHat, "Backwards Hat"),
    TraitMatch::any(Feature::PlasmaVision, "Plasma Vision"),
    TraitMatch::any(Feature::FlameShades, "Flame Shades"),
    TraitMatch::any(Feature::SportShades, "Sport Shades"),
    TraitMatch::any(Feature::TheDonShades, "The Don Shades"),
    TraitMatch::any(Feature::ThickFrames, "Thick Frames"),
    TraitMatch::any(Feature::ThinShades, "Thin Shades"),
    TraitMatch::any(Feature::Oversized, "Oversized"),
    TraitMatch::any(Feature::GeometricShades, "Geometric Shades"),
    TraitMatch::any(Feature::BitcoinBallers, "Bitcoin Ballers"),
    TraitMatch::any(Feature::BackwardsBandana, "Backwards Bandana"),
    TraitMatch::any(Feature::Beanie, "Beanie"),
    TraitMatch::any(Feature::KnitBeanie, "Knit Beanie"),
    TraitMatch::any(Feature::Sweatband, "Sweatband"),
    TraitMatch::any(Feature::ZippedPuffer, "Zipped Puffer"),
    TraitMatch::within(Feature::BandanaHead, Category::Head, "Bandana"),
    TraitMatch::within(Feature::BandanaMouth, Category::Mouth, "Bandana"),
    TraitMatch::within(Feature::Dumbfounded, Category::Mouth, "Dumbfounded"),
    TraitMatch::within(Feature::Rose, Category::Mouth, "Rose"),
    TraitMatch::within(Feature::Tongue, Category::Mouth, "Tongue"),
    TraitMatch::within(Feature::Sakura, Category::Head, "Sakura"),
    TraitMatch::within(Feature::PanelHat, Category::Head, "Panel Hat"),
];

/// Features that hold when any of the listed features holds
pub const DERIVED_FEATURES: &[(Feature, &[Feature])] = &[
    (
        Feature::Glasses,
        &[
            Feature::FlameShades,
            Feature::GeometricShades,
            Feature::TheDonShades,
            Feature::ThickFrames,
            Feature::ThinShades,
            Feature::SportShades,
            Feature::Oversized,
            Feature::PlasmaVision,
            Feature::BitcoinBallers,
        ],
    ),
    (
        Feature::BigGlasses,
        &[
            Feature::FlameShades,
            Feature::Oversized,
            Feature::PlasmaVision,
            Feature::BitcoinBallers,
        ],
    ),
    (
        Feature::BigHead,
        &[
            Feature::Sakura,
            Feature::MessyHair,
            Feature::TwoToneBraids,
            Feature::Dreadlocks,
            Feature::TrooperHat,
        ],
    ),
    (
        Feature::CoveredHead,
        &[
            Feature::TrooperHat,
            Feature::BackwardsHat,
            Feature::BackwardsBandana,
            Feature::BandanaHead,
            Feature::Beanie,
            Feature::Sweatband,
        ],
    ),
];

/// Compute the feature set of an assignment
///
/// Total over every assignment; values nothing matches leave their features unset.
pub fn resolve(assignment: &TraitAssignment) -> FeatureSet {
    let mut features = FeatureSet::empty();

    for binding in assignment.traits() {
        for row in TRAIT_MATCHES {
            if row.matches(binding) {
                features.insert(row.feature);
            }
        }
    }

    for &(derived, sources) in DERIVED_FEATURES {
        if features.contains_any(sources) {
            features.insert(derived);
        }
    }

    features
}
