//! Tests for batch progress tracking

#[cfg(test)]
mod tests {
    use traitmint::io::progress::BatchProgress;

    // Tests counting of finished and failed tokens
    // Verified by skipping failed tokens
    #[test]
    fn test_hidden_progress_counts() {
        let progress = BatchProgress::hidden(4);

        progress.token_done();
        progress.token_failed(7);
        progress.token_done();

        assert_eq!(progress.position(), 3);
        progress.finish(2, 1);
    }

    // Tests that clones share one bar
    // Verified by creating a new bar on clone
    #[test]
    fn test_clones_share_position() {
        let progress = BatchProgress::new(10);
        let worker = progress.clone();

        worker.token_done();
        worker.token_done();

        assert_eq!(progress.position(), 2);
        progress.finish(2, 0);
    }

    // Tests updates from several threads
    // Verified by counting on a thread-local bar
    #[test]
    fn test_concurrent_updates() {
        let progress = BatchProgress::hidden(64);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let worker = progress.clone();
                scope.spawn(move || {
                    for _ in 0..16 {
                        worker.token_done();
                    }
                });
            }
        });

        assert_eq!(progress.position(), 64);
    }
}
