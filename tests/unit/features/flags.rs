//! Tests for feature flags and fixed-size feature sets

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use traitmint::features::{Feature, FeatureSet};

    // Tests that every feature is listed once with a unique name
    // Verified by repeating a name
    #[test]
    fn test_feature_names_unique() {
        let names: HashSet<&str> = Feature::ALL.into_iter().map(Feature::name).collect();

        assert_eq!(Feature::ALL.len(), Feature::COUNT);
        assert_eq!(names.len(), Feature::COUNT);
        assert_eq!(Feature::TheDonShades.to_string(), "the-don-shades");
    }

    // Tests the empty set
    // Verified by starting with all bits set
    #[test]
    fn test_empty_set() {
        let set = FeatureSet::empty();

        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
        assert_eq!(set.iter().count(), 0);
        assert_eq!(set, FeatureSet::default());
    }

    // Tests membership queries
    // Verified by testing the wrong bit
    #[test]
    fn test_contains() {
        let set = FeatureSet::from_features(&[Feature::Lasers, Feature::CoveredHead]);

        assert!(set.contains(Feature::Lasers));
        assert!(set.contains(Feature::CoveredHead));
        assert!(!set.contains(Feature::Robot));
        assert!(set.contains_any(&[Feature::Robot, Feature::Lasers]));
        assert!(!set.contains_any(&[Feature::Robot, Feature::Glasses]));
        assert!(!set.contains_any(&[]));
        assert_eq!(set.count(), 2);
        assert!(!set.is_empty());
    }

    // Tests iteration and display in declaration order
    // Verified by iterating in insertion order
    #[test]
    fn test_iter_declaration_order() {
        let set = FeatureSet::from_features(&[Feature::Rose, Feature::Lasers, Feature::Rose]);

        let features: Vec<Feature> = set.iter().collect();
        assert_eq!(features, [Feature::Lasers, Feature::Rose]);
        assert_eq!(set.to_string(), "FeatureSet(lasers, rose)");
        assert_eq!(format!("{set:?}"), "{Lasers, Rose}");
    }

    // Tests that the last feature fits the set
    // Verified by shrinking the backing array
    #[test]
    fn test_all_features_fit() {
        let set = FeatureSet::from_features(&Feature::ALL);

        assert_eq!(set.count(), Feature::COUNT);
        assert!(set.contains(Feature::CoveredHead));
    }
}
