//! Declarative conflict rules and the ordered rule book
//!
//! A rule is keyed by the category step it fires on and a condition over the
//! token's feature set. Rules of one step are evaluated in book order: every
//! matching `Continue` rule applies its effects, and the first matching
//! `Resolve` rule applies its effects and ends the step without the base layer
//! being drawn. Book order is part of the visual result because later draws
//! cover earlier ones.

use crate::catalog::category::Category;
use crate::catalog::store::Catalog;
use crate::features::flags::{Feature, FeatureSet};
use crate::io::error::{GenerationError, Result};
use crate::raster::canvas::Rect;
use crate::raster::patch::CropRegion;
use std::fmt;

/// Predicate over a feature set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Always holds
    Always,
    /// Feature is active
    Has(Feature),
    /// Feature is inactive
    Lacks(Feature),
    /// Every sub-condition holds
    All(&'static [Condition]),
    /// At least one sub-condition holds
    Any(&'static [Condition]),
    /// Sub-condition does not hold
    Not(&'static Condition),
}

impl Condition {
    /// Evaluate against a feature set
    pub fn holds(&self, features: &FeatureSet) -> bool {
        match self {
            Self::Always => true,
            Self::Has(feature) => features.contains(*feature),
            Self::Lacks(feature) => !features.contains(*feature),
            Self::All(conditions) => conditions.iter().all(|c| c.holds(features)),
            Self::Any(conditions) => conditions.iter().any(|c| c.holds(features)),
            Self::Not(condition) => !condition.holds(features),
        }
    }
}

/// Where the pixels of a draw come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Layer of the variant drawn for the current step
    Base,
    /// Layer of a named variant of a category
    Variant(Category, &'static str),
    /// Special asset not owned by any category
    Special(&'static str),
    /// Layer currently held for a category during this render
    Held(Category),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Variant(category, name) => write!(f, "{category}/{name}"),
            Self::Special(name) => write!(f, "special:{name}"),
            Self::Held(category) => write!(f, "held:{category}"),
        }
    }
}

/// Single operation a rule performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Draw a layer over the whole canvas
    Draw(Source),
    /// Draw only a region of a layer, in place
    DrawCropped(Source, CropRegion),
    /// Replace a canvas rectangle with the canvas colour at `sample`
    Fill {
        /// Rectangle to overwrite
        region: Rect,
        /// Canvas point whose colour is used
        sample: [u32; 2],
    },
    /// Replace the layer held for a category
    Hold(Category, Source),
}

/// What a matching rule does to the rest of its step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Extra draw; later rules are evaluated and the base layer is still drawn
    Continue,
    /// Step decided; later rules are skipped and the base layer is not drawn
    Resolve,
}

/// Priority-ordered visual conflict resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRule {
    /// Name reported in traces and errors
    pub name: &'static str,
    /// Category step the rule is evaluated on
    pub step: Category,
    /// Feature condition that must hold
    pub when: Condition,
    /// Effects applied in order when the rule fires
    pub effects: Vec<Effect>,
    /// Effect of firing on the rest of the step
    pub outcome: Outcome,
}

impl ConflictRule {
    /// Extra draws that leave the step open
    pub fn extra(
        name: &'static str,
        step: Category,
        when: Condition,
        effects: impl Into<Vec<Effect>>,
    ) -> Self {
        Self {
            name,
            step,
            when,
            effects: effects.into(),
            outcome: Outcome::Continue,
        }
    }

    /// Effects that replace the step's base layer
    pub fn resolve(
        name: &'static str,
        step: Category,
        when: Condition,
        effects: impl Into<Vec<Effect>>,
    ) -> Self {
        Self {
            name,
            step,
            when,
            effects: effects.into(),
            outcome: Outcome::Resolve,
        }
    }

    /// Draw an alternate asset instead of the base layer
    pub fn substitute(name: &'static str, step: Category, when: Condition, source: Source) -> Self {
        Self::resolve(name, step, when, [Effect::Draw(source)])
    }

    /// Draw nothing for the step
    pub fn suppress(name: &'static str, step: Category, when: Condition) -> Self {
        Self::resolve(name, step, when, Vec::new())
    }

    /// Whether the rule fires on `step` for the given features
    pub fn matches(&self, step: Category, features: &FeatureSet) -> bool {
        self.step == step && self.when.holds(features)
    }
}

/// Ordered rule table for one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    rules: Vec<ConflictRule>,
}

impl RuleBook {
    /// Rule book from rules in priority order
    pub const fn new(rules: Vec<ConflictRule>) -> Self {
        Self { rules }
    }

    /// Rule book without rules; every step draws its base layer
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// All rules in priority order
    pub fn rules(&self) -> &[ConflictRule] {
        &self.rules
    }

    /// Rules evaluated on one step, in priority order
    pub fn rules_for(&self, step: Category) -> impl Iterator<Item = &ConflictRule> {
        self.rules.iter().filter(move |rule| rule.step == step)
    }

    /// Number of rules
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the book has no rules
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the special assets the rules reference, sorted and deduplicated
    pub fn special_assets(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .rules
            .iter()
            .flat_map(|rule| rule.effects.iter())
            .filter_map(|effect| match effect {
                Effect::Draw(Source::Special(name))
                | Effect::DrawCropped(Source::Special(name), _)
                | Effect::Hold(_, Source::Special(name)) => Some(*name),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Check every rule against a catalog before rendering
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A rule draws or holds a variant or special asset the catalog lacks
    /// - A fixed crop extent is zero
    /// - A fill region or its sample point lies off the canvas
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        let (width, height) = catalog.dimensions();

        for rule in &self.rules {
            for effect in &rule.effects {
                match effect {
                    Effect::Draw(source) | Effect::Hold(_, source) => {
                        check_source(rule, *source, catalog)?;
                    }
                    Effect::DrawCropped(source, region) => {
                        check_source(rule, *source, catalog)?;
                        if region.clip(width, height).is_none() {
                            return Err(GenerationError::InvalidRule {
                                rule: rule.name,
                                reason: format!("crop {region:?} is empty on {width}x{height}"),
                            });
                        }
                    }
                    Effect::Fill { region, sample } => {
                        if !region.fits(width, height)
                            || sample[0] >= width
                            || sample[1] >= height
                        {
                            return Err(GenerationError::InvalidRule {
                                rule: rule.name,
                                reason: format!(
                                    "fill {region:?} sampled at {sample:?} leaves {width}x{height} canvas"
                                ),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn check_source(rule: &ConflictRule, source: Source, catalog: &Catalog) -> Result<()> {
    let found = match source {
        Source::Base | Source::Held(_) => true,
        Source::Variant(category, name) => catalog.table(category).get(name).is_some(),
        Source::Special(name) => catalog.special(name).is_ok(),
    };
    if found {
        Ok(())
    } else {
        Err(GenerationError::MissingAsset {
            asset: source.to_string(),
            rule: Some(rule.name),
        })
    }
}
