//! Layer-by-layer composition of one token
//!
//! Categories are visited in [`Category::ORDER`]. Each visit is a step: the
//! held slot of the category is set to the drawn variant's layer, the rules of
//! the step run in book order, and unless a resolving rule fired the variant's
//! own layer is drawn last. Held slots survive across steps so later rules can
//! redraw or crop layers picked earlier (glasses over a mouth, a head over
//! jewelry).

use crate::catalog::category::Category;
use crate::catalog::store::{Catalog, Layer};
use crate::compose::rules::{ConflictRule, Effect, Outcome, RuleBook, Source};
use crate::features::flags::FeatureSet;
use crate::io::error::{GenerationError, Result};
use crate::raster::canvas::Canvas;
use crate::raster::patch::Patch;
use crate::sampling::assembler::TraitAssignment;

/// What happened on one category step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTrace {
    /// Category of the step
    pub step: Category,
    /// Variant drawn for the category
    pub variant: String,
    /// Names of the rules that fired, in firing order
    pub fired: Vec<&'static str>,
    /// Whether the variant's own layer reached the canvas
    pub base_drawn: bool,
    /// Number of layers or patches composited on the step
    pub draws: usize,
}

/// Composed canvas with a per-step record of the rules that shaped it
#[derive(Debug, Clone)]
pub struct Composition {
    canvas: Canvas,
    trace: Vec<StepTrace>,
}

impl Composition {
    /// Composed canvas
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Split into the canvas and the step records
    pub fn into_parts(self) -> (Canvas, Vec<StepTrace>) {
        (self.canvas, self.trace)
    }

    /// Step records in category order
    pub fn trace(&self) -> &[StepTrace] {
        &self.trace
    }

    /// Record of one step
    pub fn step(&self, category: Category) -> Option<&StepTrace> {
        self.trace.iter().find(|step| step.step == category)
    }

    /// Total number of draws over every step
    pub fn draw_count(&self) -> usize {
        self.trace.iter().map(|step| step.draws).sum()
    }

    /// Names of every rule that fired, in firing order
    pub fn fired_rules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.trace.iter().flat_map(|step| step.fired.iter().copied())
    }
}

/// Layers held per category for the duration of one render
#[derive(Debug, Clone, Default)]
pub struct HeldLayers {
    slots: [Option<Layer>; Category::COUNT],
}

impl HeldLayers {
    /// Layer currently held for a category
    pub fn get(&self, category: Category) -> Option<&Layer> {
        self.slots.get(category.index()).and_then(Option::as_ref)
    }

    /// Replace the layer held for a category
    pub fn set(&mut self, category: Category, layer: Option<Layer>) {
        if let Some(slot) = self.slots.get_mut(category.index()) {
            *slot = layer;
        }
    }

    /// Whether no category holds a layer
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Applies a rule book to trait assignments of one catalog
#[derive(Debug, Clone, Copy)]
pub struct Compositor<'a> {
    catalog: &'a Catalog,
    rules: &'a RuleBook,
}

impl<'a> Compositor<'a> {
    /// Create a compositor
    pub const fn new(catalog: &'a Catalog, rules: &'a RuleBook) -> Self {
        Self { catalog, rules }
    }

    /// Compose the canvas of one token
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A trait value or a rule's asset is missing from the catalog
    /// - A crop or fill cannot be applied to the canvas
    pub fn compose(
        &self,
        assignment: &TraitAssignment,
        features: &FeatureSet,
    ) -> Result<Composition> {
        let (width, height) = self.catalog.dimensions();
        let mut render = Render {
            catalog: self.catalog,
            canvas: Canvas::new(width, height),
            held: HeldLayers::default(),
        };
        let mut trace = Vec::with_capacity(Category::COUNT);

        for category in Category::ORDER {
            let value = assignment.value(category);
            let base = self.catalog.variant(category, value)?.layer().cloned();
            render.held.set(category, base.clone());

            let mut step = StepTrace {
                step: category,
                variant: value.to_owned(),
                fired: Vec::new(),
                base_drawn: false,
                draws: 0,
            };
            let mut resolved = false;

            for rule in self.rules.rules_for(category) {
                if !rule.when.holds(features) {
                    continue;
                }
                for effect in &rule.effects {
                    step.draws += render.apply(rule, effect, base.as_ref())?;
                }
                step.fired.push(rule.name);
                if rule.outcome == Outcome::Resolve {
                    resolved = true;
                    break;
                }
            }

            if !resolved && let Some(layer) = &base {
                render.canvas.draw_over(layer, [0, 0]);
                step.base_drawn = true;
                step.draws += 1;
            }

            tracing::trace!(
                step = %category,
                variant = value,
                fired = ?step.fired,
                draws = step.draws,
                "step composed"
            );
            trace.push(step);
        }

        Ok(Composition {
            canvas: render.canvas,
            trace,
        })
    }
}

struct Render<'a> {
    catalog: &'a Catalog,
    canvas: Canvas,
    held: HeldLayers,
}

impl Render<'_> {
    // Returns the number of draws the effect made
    fn apply(&mut self, rule: &ConflictRule, effect: &Effect, base: Option<&Layer>) -> Result<usize> {
        match *effect {
            Effect::Draw(source) => match self.layer(rule, source, base)? {
                Some(layer) => {
                    self.canvas.draw_over(&layer, [0, 0]);
                    Ok(1)
                }
                None => Ok(0),
            },
            Effect::DrawCropped(source, region) => match self.layer(rule, source, base)? {
                Some(layer) => {
                    let patch = Patch::crop(&layer, &region)?;
                    self.canvas.draw_patch(&patch);
                    Ok(1)
                }
                None => Ok(0),
            },
            Effect::Fill { region, sample } => {
                self.canvas.fill_region(region, sample)?;
                Ok(1)
            }
            Effect::Hold(category, source) => {
                let layer = self.layer(rule, source, base)?;
                self.held.set(category, layer);
                Ok(0)
            }
        }
    }

    fn layer(
        &self,
        rule: &ConflictRule,
        source: Source,
        base: Option<&Layer>,
    ) -> Result<Option<Layer>> {
        let layer = match source {
            Source::Base => base.cloned(),
            Source::Held(category) => self.held.get(category).cloned(),
            Source::Variant(category, name) => self
                .catalog
                .variant(category, name)
                .map_err(|e| attribute(e, rule))?
                .layer()
                .cloned(),
            Source::Special(name) => Some(
                self.catalog
                    .special(name)
                    .map_err(|e| attribute(e, rule))?
                    .clone(),
            ),
        };
        Ok(layer)
    }
}

fn attribute(error: GenerationError, rule: &ConflictRule) -> GenerationError {
    match error {
        GenerationError::MissingAsset { asset, rule: None } => GenerationError::MissingAsset {
            asset,
            rule: Some(rule.name),
        },
        other => other,
    }
}
