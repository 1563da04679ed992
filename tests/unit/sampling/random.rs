//! Tests for seeded per-token random streams

#[cfg(test)]
mod tests {
    use traitmint::sampling::random::{RandomSelector, mix_token_seed};

    // Tests reproducibility of a seeded stream
    // Verified by seeding from entropy
    #[test]
    fn test_same_seed_same_rolls() {
        let mut first = RandomSelector::new(42);
        let mut second = RandomSelector::new(42);

        let a: Vec<u32> = (0..64).map(|_| first.roll(1000)).collect();
        let b: Vec<u32> = (0..64).map(|_| second.roll(1000)).collect();

        assert_eq!(a, b);
    }

    // Tests that token streams are derived from the mixed seed
    // Verified by ignoring the token identifier
    #[test]
    fn test_for_token_matches_mixed_seed() {
        let mut token = RandomSelector::for_token(42, 9);
        let mut direct = RandomSelector::new(mix_token_seed(42, 9));

        for _ in 0..16 {
            assert_eq!(token.roll(1000), direct.roll(1000));
        }
    }

    // Tests that neighbouring tokens get different seeds
    // Verified by returning the batch seed unchanged
    #[test]
    fn test_mix_token_seed_distinct() {
        let seeds: std::collections::HashSet<u64> =
            (0..1000).map(|token| mix_token_seed(42, token)).collect();

        assert_eq!(seeds.len(), 1000);
        assert_ne!(mix_token_seed(1, 0), mix_token_seed(2, 0));
    }

    // Tests roll bounds including the zero bound
    // Verified by calling random_range on an empty range
    #[test]
    fn test_roll_bounds() {
        let mut selector = RandomSelector::new(3);

        assert_eq!(selector.roll(0), 0);
        for _ in 0..500 {
            assert!(selector.roll(7) < 7);
        }
        assert_eq!(selector.roll(1), 0);
    }
}
