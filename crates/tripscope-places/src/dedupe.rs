use std::collections::HashSet;
use std::hash::Hash;

/// What to do with records that have no identity key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Key-less records are never considered duplicates of each other.
    #[default]
    KeepAll,
    /// All key-less records are treated as one identity; only the first survives.
    Collapse,
}

/// Removes records whose key was already seen, keeping the first occurrence
/// and the input order.
pub fn dedupe_by_key<T, K, F>(records: Vec<T>, key_selector: F, policy: MissingKeyPolicy) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> Option<K>,
{
    let mut seen = HashSet::new();
    let mut seen_keyless = false;

    records
        .into_iter()
        .filter(|record| match key_selector(record) {
            Some(key) => seen.insert(key),
            None => match policy {
                MissingKeyPolicy::KeepAll => true,
                MissingKeyPolicy::Collapse => !std::mem::replace(&mut seen_keyless, true),
            },
        })
        .collect()
}
