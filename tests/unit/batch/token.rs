//! Tests for the single-token render pipeline

#[cfg(test)]
mod tests {
    use crate::fixtures::{SIZE, basic_catalog};
    use traitmint::GenerationError;
    use traitmint::batch::TokenRenderer;
    use traitmint::catalog::Category;
    use traitmint::compose::RuleBook;
    use traitmint::compose::rules::{Condition, ConflictRule, Source};
    use traitmint::features::resolver::resolve;
    use traitmint::sampling::assembler::{MetadataAssembler, TraitAssignment};

    // Tests that a token renders identically every time
    // Verified by sharing one random stream across renders
    #[test]
    fn test_render_is_deterministic() {
        let catalog = basic_catalog();
        let rules = RuleBook::empty();
        let renderer = TokenRenderer::new(&catalog, &rules, 42);

        let first = renderer.render(7).unwrap();
        let second = renderer.render(7).unwrap();

        assert_eq!(first.token_id(), 7);
        assert_eq!(first.assignment, second.assignment);
        assert_eq!(first.canvas, second.canvas);
        assert_eq!(first.canvas.dimensions(), (SIZE, SIZE));
        assert_eq!(first.trace.len(), Category::COUNT);
    }

    // Tests that rendering draws the assembler's assignment
    // Verified by seeding the renderer with the token id only
    #[test]
    fn test_assign_matches_assembler() {
        let catalog = basic_catalog();
        let rules = RuleBook::empty();
        let renderer = TokenRenderer::new(&catalog, &rules, 99);
        let assembler = MetadataAssembler::new(&catalog, 99);

        for token_id in 0..20 {
            let assignment = renderer.assign(token_id).unwrap();
            assert_eq!(assignment, assembler.assemble(token_id).unwrap());
            let rendered = renderer.compose(assignment.clone()).unwrap();
            assert_eq!(rendered.features, resolve(&assignment));
        }
    }

    // Tests that composition failures carry the token id
    // Verified by returning the bare composition error
    #[test]
    fn test_compose_error_names_token() {
        let catalog = basic_catalog();
        let rules = RuleBook::empty();
        let renderer = TokenRenderer::new(&catalog, &rules, 1);
        let assignment =
            TraitAssignment::from_values(12, ["Blue", "Brown", "Tee", "Laser", "Cap", "Smile", "Chain"]);

        let error = renderer.compose(assignment).unwrap_err();

        assert_eq!(error.token_id(), Some(12));
        assert!(matches!(
            error,
            GenerationError::Token { ref source, .. }
                if matches!(**source, GenerationError::MissingAsset { .. })
        ));
    }

    // Tests that rule asset errors surface through render
    // Verified by swallowing rule errors
    #[test]
    fn test_render_rule_error() {
        let catalog = basic_catalog();
        let rules = RuleBook::new(vec![ConflictRule::substitute(
            "ghost",
            Category::Background,
            Condition::Always,
            Source::Special("Ghost"),
        )]);
        let renderer = TokenRenderer::new(&catalog, &rules, 1);

        let error = renderer.render(3).unwrap_err();

        assert_eq!(error.token_id(), Some(3));
        assert_eq!(error.kind(), traitmint::io::error::ErrorKind::Configuration);
    }
}
