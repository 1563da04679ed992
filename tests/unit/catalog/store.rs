//! Tests for catalog building, validation and lookup

#[cfg(test)]
mod tests {
    use crate::fixtures::{SIZE, basic_catalog, solid, tint};
    use image::RgbaImage;
    use traitmint::GenerationError;
    use traitmint::catalog::{Catalog, Category};
    use traitmint::io::configuration::NONE_VARIANT;

    // Tests that the shortfall goes to the no-layer variant
    // Verified by leaving the table short of one thousand
    #[test]
    fn test_none_variant_takes_shortfall() {
        let catalog = basic_catalog();
        let table = catalog.table(Category::Jewelry);

        assert_eq!(table.none_weight(), 700);
        assert_eq!(table.weights().total(), 1000);
        let none = table.get(NONE_VARIANT).unwrap();
        assert!(none.is_none());
        assert!(none.layer().is_none());
    }

    // Tests that a full table gets no no-layer variant
    // Verified by always inserting the no-layer variant
    #[test]
    fn test_full_table_has_no_none_variant() {
        let catalog = Catalog::builder(SIZE, SIZE)
            .variant(Category::Background, "Blue", 400, solid(tint(1)))
            .variant(Category::Background, "Red", 600, solid(tint(2)))
            .build()
            .unwrap();
        let table = catalog.table(Category::Background);

        assert_eq!(table.none_weight(), 0);
        assert!(table.get(NONE_VARIANT).is_none());
        assert_eq!(table.variants().len(), 2);
    }

    // Tests that empty categories draw nothing
    // Verified by rejecting empty categories
    #[test]
    fn test_empty_category_is_all_none() {
        let catalog = Catalog::builder(SIZE, SIZE).build().unwrap();

        for table in catalog.tables() {
            assert_eq!(table.variants().len(), 1);
            assert_eq!(table.none_weight(), 1000);
        }
    }

    // Tests that variants are kept sorted by name
    // Verified by keeping insertion order
    #[test]
    fn test_variants_sorted_by_name() {
        let catalog = Catalog::builder(SIZE, SIZE)
            .variant(Category::Head, "Visor", 100, solid(tint(1)))
            .variant(Category::Head, "Beanie", 100, solid(tint(2)))
            .variant(Category::Head, "Crown", 100, solid(tint(3)))
            .build()
            .unwrap();

        let names: Vec<&str> = catalog
            .table(Category::Head)
            .variants()
            .iter()
            .map(|variant| variant.name())
            .collect();
        assert_eq!(names, ["Beanie", "Crown", "Visor", NONE_VARIANT]);

        let table = catalog.table(Category::Head);
        assert_eq!(table.at(1).map(|v| v.name()), Some("Crown"));
        assert_eq!(table.weights().weight(3), Some(700));
    }

    // Tests rejection of weight sums above one thousand
    // Verified by clamping the no-layer weight at zero
    #[test]
    fn test_weight_overflow() {
        let result = Catalog::builder(SIZE, SIZE)
            .variant(Category::Eyes, "A", 600, solid(tint(1)))
            .variant(Category::Eyes, "B", 500, solid(tint(2)))
            .build();

        assert!(matches!(
            result,
            Err(GenerationError::WeightOverflow {
                category: Category::Eyes,
                total: 1100
            })
        ));
    }

    // Tests rejection of negative and oversized weights
    // Verified by casting weights without a range check
    #[test]
    fn test_invalid_weight() {
        for weight in [-1, 1001] {
            let result = Catalog::builder(SIZE, SIZE)
                .variant(Category::Mouth, "Smile", weight, solid(tint(1)))
                .build();
            assert!(matches!(
                result,
                Err(GenerationError::InvalidWeight { weight: w, .. }) if w == weight
            ));
        }
    }

    // Tests rejection of repeated and reserved variant names
    // Verified by overwriting duplicates silently
    #[test]
    fn test_duplicate_variant() {
        let repeated = Catalog::builder(SIZE, SIZE)
            .variant(Category::Fur, "Brown", 100, solid(tint(1)))
            .variant(Category::Fur, "Brown", 100, solid(tint(2)))
            .build();
        let reserved = Catalog::builder(SIZE, SIZE)
            .variant(Category::Fur, NONE_VARIANT, 100, solid(tint(1)))
            .build();

        assert!(matches!(
            repeated,
            Err(GenerationError::DuplicateVariant { .. })
        ));
        assert!(matches!(
            reserved,
            Err(GenerationError::DuplicateVariant { .. })
        ));
    }

    // Tests that the same name may appear in different categories
    // Verified by keying names globally
    #[test]
    fn test_same_name_in_two_categories() {
        let catalog = Catalog::builder(SIZE, SIZE)
            .variant(Category::Head, "Bandana", 100, solid(tint(1)))
            .variant(Category::Mouth, "Bandana", 100, solid(tint(2)))
            .build()
            .unwrap();

        assert!(catalog.variant(Category::Head, "Bandana").is_ok());
        assert!(catalog.variant(Category::Mouth, "Bandana").is_ok());
    }

    // Tests rejection of layers larger than the canvas
    // Verified by skipping the size check for specials
    #[test]
    fn test_layer_larger_than_canvas() {
        let variant = Catalog::builder(SIZE, SIZE)
            .variant(Category::Fur, "Huge", 100, RgbaImage::new(SIZE + 1, SIZE))
            .build();
        let special = Catalog::builder(SIZE, SIZE)
            .special("Huge", RgbaImage::new(SIZE, SIZE + 1))
            .build();

        assert!(matches!(variant, Err(GenerationError::InvalidLayer { .. })));
        assert!(matches!(special, Err(GenerationError::InvalidLayer { .. })));
    }

    // Tests that smaller layers are accepted
    // Verified by requiring exact canvas size
    #[test]
    fn test_smaller_layer_accepted() {
        let catalog = Catalog::builder(SIZE, SIZE)
            .variant(Category::Jewelry, "Pin", 100, RgbaImage::new(2, 2))
            .build()
            .unwrap();

        let layer = catalog
            .variant(Category::Jewelry, "Pin")
            .unwrap()
            .layer()
            .unwrap();
        assert_eq!(layer.dimensions(), (2, 2));
        assert_eq!(catalog.dimensions(), (SIZE, SIZE));
    }

    // Tests special asset lookup and listing
    // Verified by returning names in hash order
    #[test]
    fn test_special_lookup() {
        let catalog = basic_catalog();

        assert_eq!(catalog.special_names(), ["Gradient", "Halo"]);
        assert!(catalog.special("Halo").is_ok());
        assert!(matches!(
            catalog.special("Ghost"),
            Err(GenerationError::MissingAsset { ref asset, rule: None }) if asset == "special:Ghost"
        ));
    }

    // Tests rejection of repeated special names
    // Verified by keeping the last declaration
    #[test]
    fn test_duplicate_special() {
        let result = Catalog::builder(SIZE, SIZE)
            .special("Halo", solid(tint(1)))
            .special("Halo", solid(tint(2)))
            .build();

        assert!(matches!(result, Err(GenerationError::InvalidLayer { .. })));
    }

    // Tests variant lookup errors
    // Verified by falling back to the no-layer variant
    #[test]
    fn test_missing_variant() {
        let catalog = basic_catalog();

        assert!(matches!(
            catalog.variant(Category::Eyes, "Laser"),
            Err(GenerationError::MissingAsset { ref asset, .. }) if asset == "Eyes/Laser"
        ));
        assert_eq!(catalog.variant(Category::Eyes, "Plain").unwrap().weight(), 700);
    }
}
