/// Small helpers over code point ranges and multi-valued maps.
use std::collections::BTreeMap;

/// Inclusive range of code points, e.g. `range(1, 3)` is `[1, 2, 3]`.
pub fn range(start: u32, stop: u32) -> Vec<u32> {
    (start..=stop).collect()
}

/// Push `value` onto the list at `key`, creating the list if needed.
pub fn append<K: Ord, V>(map: &mut BTreeMap<K, Vec<V>>, key: K, value: V) {
    map.entry(key).or_default().push(value);
}

/// Append every value of `source` onto `destination`, key by key.
/// Keys with no values in `source` still get an (empty) entry.
pub fn extend<K: Ord + Clone, V: Clone>(
    destination: &mut BTreeMap<K, Vec<V>>,
    source: &BTreeMap<K, Vec<V>>,
) {
    for (key, values) in source {
        destination
            .entry(key.clone())
            .or_default()
            .extend(values.iter().cloned());
    }
}
