use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::debug;

/// Connected-session counts per version label.
///
/// Labels rather than parsed names so sessions on unknown protocols still
/// show up, under their `unknown (protocol N)` form.
#[derive(Debug, Default)]
pub struct VersionMetrics {
    counts: RwLock<BTreeMap<String, usize>>,
}

impl VersionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_join(&self, label: &str) {
        let mut counts = self.counts.write().unwrap();
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }

    pub fn record_leave(&self, label: &str) {
        let mut counts = self.counts.write().unwrap();
        if let Some(count) = counts.get_mut(label) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                counts.remove(label);
            }
        }
    }

    pub fn snapshot(&self) -> BTreeMap<String, usize> {
        self.counts.read().unwrap().clone()
    }

    pub fn total(&self) -> usize {
        self.counts.read().unwrap().values().sum()
    }

    /// Emit the periodic summary line. The host decides the cadence; there
    /// is no scheduler in here.
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        debug!("version metrics: {snapshot:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_leave_balance() {
        let metrics = VersionMetrics::new();
        metrics.record_join("1.21.30");
        metrics.record_join("1.21.30");
        metrics.record_join("1.21.10");
        assert_eq!(metrics.total(), 3);
        assert_eq!(metrics.snapshot().get("1.21.30"), Some(&2));

        metrics.record_leave("1.21.30");
        metrics.record_leave("1.21.10");
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.get("1.21.30"), Some(&1));
        // Versions with nobody left drop out of the snapshot.
        assert_eq!(snapshot.get("1.21.10"), None);
    }

    #[test]
    fn test_leave_without_join_is_harmless() {
        let metrics = VersionMetrics::new();
        metrics.record_leave("1.21.30");
        assert_eq!(metrics.total(), 0);
    }
}
