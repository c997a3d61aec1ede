//! Per-item outcome bookkeeping for sequential batch loops.
//!
//! Every orchestrator that walks a batch (uploads, thumbnails) records each
//! item's fate here instead of silently swallowing failures. One item's
//! failure never aborts its siblings; the batch as a whole fails only when
//! nothing succeeded.

/// Accumulated outcomes for one batch pass.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    attempted: usize,
    succeeded: usize,
    failures: Vec<String>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successful item.
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    /// Record one failed item with the reason it was skipped.
    pub fn record_failure(&mut self, reason: impl Into<String>) {
        self.attempted += 1;
        self.failures.push(reason.into());
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Reasons for every skipped item, in batch order.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    /// True when at least one item was attempted and none succeeded.
    pub fn is_total_failure(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_mixed_outcomes() {
        let mut outcome = BatchOutcome::new();
        outcome.record_success();
        outcome.record_failure("model returned no image");
        outcome.record_success();

        assert_eq!(outcome.attempted(), 3);
        assert_eq!(outcome.succeeded(), 2);
        assert_eq!(outcome.failed(), 1);
        assert_eq!(outcome.failures(), ["model returned no image"]);
        assert!(!outcome.is_total_failure());
    }

    #[test]
    fn all_failures_is_total_failure() {
        let mut outcome = BatchOutcome::new();
        outcome.record_failure("a");
        outcome.record_failure("b");
        assert!(outcome.is_total_failure());
    }

    #[test]
    fn empty_batch_is_not_total_failure() {
        assert!(!BatchOutcome::new().is_total_failure());
    }
}
