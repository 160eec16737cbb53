use crate::handlers::HandlerCategory;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use strata_mapper::{ConversionFn, RuleKey};

/// How a (kind, from, to) key translates: through a registered exact-pair
/// rule, through a generic category handler, or by passing the packet
/// along untouched.
#[derive(Clone)]
pub enum Resolution {
    Rule(Arc<ConversionFn>),
    Category(HandlerCategory),
    PassThrough,
}

impl std::fmt::Debug for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Rule(_) => f.write_str("Rule"),
            Resolution::Category(category) => write!(f, "Category({category:?})"),
            Resolution::PassThrough => f.write_str("PassThrough"),
        }
    }
}

/// Cache of resolved translation strategies.
///
/// Keys are content-stable (packet kind plus version pair) and values are
/// shareable resolutions. Translated packets themselves are never cached;
/// two packets with the same key share a strategy, not a result. Rules
/// registered after a key has been resolved are not picked up until
/// [`RuleCache::clear`].
#[derive(Default)]
pub struct RuleCache {
    entries: RwLock<HashMap<RuleKey, Resolution>>,
}

impl RuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &RuleKey) -> Option<Resolution> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// First writer wins on a racing key; every writer computes the same
    /// resolution, so which one lands is immaterial.
    pub fn insert(&self, key: RuleKey, resolution: Resolution) {
        self.entries.write().unwrap().entry(key).or_insert(resolution);
    }

    /// Swap in an empty map. Lookups already holding the old resolution
    /// finish on it.
    pub fn clear(&self) {
        *self.entries.write().unwrap() = HashMap::new();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_protocol::PacketKind;
    use strata_types::VersionName;

    fn key() -> RuleKey {
        RuleKey::new(
            PacketKind::Text,
            VersionName::new(1, 21, 10),
            VersionName::new(1, 21, 30),
        )
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = RuleCache::new();
        cache.insert(key(), Resolution::PassThrough);
        cache.insert(key(), Resolution::Category(HandlerCategory::Movement));
        assert!(matches!(cache.get(&key()), Some(Resolution::PassThrough)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_empties() {
        let cache = RuleCache::new();
        cache.insert(key(), Resolution::PassThrough);
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&key()).is_none());
    }
}
