//! Tests for the TOML collection manifest

#[cfg(test)]
mod tests {
    use crate::fixtures::{SIZE, solid, tint};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use traitmint::GenerationError;
    use traitmint::catalog::Category;
    use traitmint::catalog::manifest::{CanvasSpec, Manifest, VariantSpec, load_catalog};
    use traitmint::io::configuration::DEFAULT_CANVAS_WIDTH;

    const MANIFEST: &str = r#"
[canvas]
width = 16
height = 16

[traits.Eyes]
values = [
    { name = "Plain", file = "Eyes/Plain.png", chance = 600 },
    { name = "Laser", file = "Eyes/Laser.png", chance = 300, active = false },
]

[traits.Background]
values = [{ name = "Blue", file = "Background/Blue.png", chance = 1000 }]

[specials]
Halo = "Special/Halo.png"
"#;

    fn write_layers(root: &Path) {
        for (index, file) in ["Eyes/Plain.png", "Background/Blue.png", "Special/Halo.png"]
            .into_iter()
            .enumerate()
        {
            let path = root.join(file);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            solid(tint(index as u8)).save(&path).unwrap();
        }
    }

    // Tests parsing with defaulted fields
    // Verified by defaulting variants to inactive
    #[test]
    fn test_from_toml() {
        let manifest = Manifest::from_toml(MANIFEST, Path::new("collection.toml")).unwrap();

        assert_eq!(
            manifest.canvas,
            CanvasSpec {
                width: 16,
                height: 16
            }
        );
        let eyes = &manifest.traits["Eyes"].values;
        assert_eq!(eyes.len(), 2);
        assert!(eyes[0].active);
        assert!(!eyes[1].active);
        assert_eq!(manifest.specials["Halo"], PathBuf::from("Special/Halo.png"));
    }

    // Tests that a missing canvas section uses the default size
    // Verified by requiring the canvas section
    #[test]
    fn test_default_canvas() {
        let manifest = Manifest::from_toml("", Path::new("empty.toml")).unwrap();

        assert_eq!(manifest.canvas.width, DEFAULT_CANVAS_WIDTH);
        assert!(manifest.traits.is_empty());
        assert!(manifest.specials.is_empty());
    }

    // Tests that non-integer chances are rejected
    // Verified by rounding floating point chances
    #[test]
    fn test_fractional_chance_rejected() {
        let text = r#"
[traits.Eyes]
values = [{ name = "Plain", file = "Eyes/Plain.png", chance = 12.5 }]
"#;
        let result = Manifest::from_toml(text, Path::new("bad.toml"));

        assert!(matches!(
            result,
            Err(GenerationError::ManifestParse { ref path, .. }) if path == Path::new("bad.toml")
        ));
    }

    // Tests filtering of inactive variants
    // Verified by ignoring the active flag
    #[test]
    fn test_active_variants() {
        let manifest = Manifest::from_toml(MANIFEST, Path::new("collection.toml")).unwrap();
        let active = manifest.active_variants().unwrap();

        let names: Vec<(Category, &str)> = active
            .iter()
            .map(|(category, variant)| (*category, variant.name.as_str()))
            .collect();
        assert_eq!(
            names,
            [(Category::Background, "Blue"), (Category::Eyes, "Plain")]
        );
    }

    // Tests rejection of unknown trait sections
    // Verified by skipping unknown sections
    #[test]
    fn test_unknown_trait_section() {
        let mut manifest = Manifest::default();
        manifest.traits.insert("Hat".to_string(), Default::default());

        assert!(matches!(
            manifest.active_variants(),
            Err(GenerationError::UnknownCategory { .. })
        ));
    }

    // Tests catalog construction from files on disk
    // Verified by resolving paths against the working directory
    #[test]
    fn test_load_catalog() {
        let dir = TempDir::new().unwrap();
        write_layers(dir.path());
        let manifest_path = dir.path().join("collection.toml");
        std::fs::write(&manifest_path, MANIFEST).unwrap();

        let catalog = load_catalog(&manifest_path).unwrap();

        assert_eq!(catalog.dimensions(), (SIZE, SIZE));
        assert_eq!(catalog.table(Category::Eyes).none_weight(), 400);
        assert!(catalog.variant(Category::Eyes, "Laser").is_err());
        assert_eq!(catalog.table(Category::Background).none_weight(), 0);
        assert_eq!(catalog.special_names(), ["Halo"]);
    }

    // Tests that a missing layer file aborts loading
    // Verified by skipping unreadable layers
    #[test]
    fn test_build_catalog_missing_layer() {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest::from_toml(MANIFEST, Path::new("collection.toml")).unwrap();

        assert!(matches!(
            manifest.build_catalog(dir.path()),
            Err(GenerationError::ImageLoad { .. })
        ));
    }

    // Tests that a written manifest reads back unchanged
    // Verified by dropping the active flag when serializing
    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("collection.toml");
        let mut manifest = Manifest::default();
        manifest.traits.entry("Mouth".to_string()).or_default().values.push(VariantSpec {
            name: "Smile".to_string(),
            file: PathBuf::from("Mouth/Smile.png"),
            chance: 250,
            active: false,
        });

        manifest.save(&path).unwrap();

        assert_eq!(Manifest::load(&path).unwrap(), manifest);
    }

    // Tests the error for an unreadable manifest file
    // Verified by treating a missing file as empty
    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            Manifest::load(&dir.path().join("absent.toml")),
            Err(GenerationError::FileSystem { .. })
        ));
    }
}
