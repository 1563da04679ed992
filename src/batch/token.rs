//! Single-token pipeline: assemble traits, resolve features, compose layers

use crate::catalog::store::Catalog;
use crate::compose::compositor::{Compositor, StepTrace};
use crate::compose::rules::RuleBook;
use crate::features::flags::FeatureSet;
use crate::features::resolver;
use crate::io::error::{Result, WithToken};
use crate::raster::canvas::Canvas;
use crate::sampling::assembler::{MetadataAssembler, TraitAssignment};

/// Everything produced for one token
#[derive(Debug, Clone)]
pub struct RenderedToken {
    /// Drawn trait values
    pub assignment: TraitAssignment,
    /// Features derived from the traits
    pub features: FeatureSet,
    /// Composed image
    pub canvas: Canvas,
    /// Rules fired on each category step
    pub trace: Vec<StepTrace>,
}

impl RenderedToken {
    /// Token identifier
    pub const fn token_id(&self) -> u64 {
        self.assignment.token_id()
    }
}

/// Renders tokens of one seeded collection
///
/// Holds only shared references, so one renderer can be used from every
/// worker of a batch.
#[derive(Debug, Clone, Copy)]
pub struct TokenRenderer<'a> {
    assembler: MetadataAssembler<'a>,
    compositor: Compositor<'a>,
}

impl<'a> TokenRenderer<'a> {
    /// Create a renderer for a catalog, rule book and batch seed
    pub const fn new(catalog: &'a Catalog, rules: &'a RuleBook, seed: u64) -> Self {
        Self {
            assembler: MetadataAssembler::new(catalog, seed),
            compositor: Compositor::new(catalog, rules),
        }
    }

    /// Draw the trait assignment of a token without composing it
    ///
    /// # Errors
    ///
    /// Returns a [`crate::GenerationError::Token`] wrapping the sampling failure
    pub fn assign(&self, token_id: u64) -> Result<TraitAssignment> {
        self.assembler.assemble(token_id).for_token(token_id)
    }

    /// Compose an already drawn assignment
    ///
    /// # Errors
    ///
    /// Returns a [`crate::GenerationError::Token`] wrapping the composition failure
    pub fn compose(&self, assignment: TraitAssignment) -> Result<RenderedToken> {
        let token_id = assignment.token_id();
        let features = resolver::resolve(&assignment);
        let composition = self
            .compositor
            .compose(&assignment, &features)
            .for_token(token_id)?;

        let (canvas, trace) = composition.into_parts();
        Ok(RenderedToken {
            assignment,
            features,
            canvas,
            trace,
        })
    }

    /// Draw and compose one token
    ///
    /// # Errors
    ///
    /// Returns a [`crate::GenerationError::Token`] if sampling or composition fails
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn render(&self, token_id: u64) -> Result<RenderedToken> {
        let assignment = self.assign(token_id)?;
        let rendered = self.compose(assignment)?;
        tracing::debug!(
            features = %rendered.features,
            fired = ?rendered.trace.iter().flat_map(|step| step.fired.iter()).collect::<Vec<_>>(),
            "token rendered"
        );
        Ok(rendered)
    }
}
