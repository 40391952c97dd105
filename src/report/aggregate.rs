//! Grouped sums and means that keep groups in order of first appearance.

use std::collections::HashMap;
use std::hash::Hash;

/// Accumulated totals for each distinct key, in discovery order.
#[derive(Debug, Clone)]
pub struct Groups<K> {
    keys: Vec<K>,
    index: HashMap<K, usize>,
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl<K: Copy + Eq + Hash> Groups<K> {
    pub fn new() -> Self {
        Groups {
            keys: Vec::new(),
            index: HashMap::new(),
            sums: Vec::new(),
            counts: Vec::new(),
        }
    }

    pub fn add(&mut self, key: K, value: f64) {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.keys.len();
                self.index.insert(key, idx);
                self.keys.push(key);
                self.sums.push(0.0);
                self.counts.push(0);
                idx
            }
        };
        self.sums[idx] += value;
        self.counts[idx] += 1;
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn sums(&self) -> Vec<(K, f64)> {
        self.keys.iter().copied().zip(self.sums.iter().copied()).collect()
    }

    pub fn counts(&self) -> Vec<(K, usize)> {
        self.keys.iter().copied().zip(self.counts.iter().copied()).collect()
    }

    pub fn means(&self) -> Vec<(K, f64)> {
        self.keys
            .iter()
            .zip(self.sums.iter().zip(&self.counts))
            .map(|(key, (sum, count))| (*key, sum / *count as f64))
            .collect()
    }
}

impl<K: Copy + Eq + Hash> Default for Groups<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Group `items` by `key` and accumulate `value` for each group.
pub fn group_by<'a, T, K, I, F, V>(items: I, key: F, value: V) -> Groups<K>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    K: Copy + Eq + Hash,
    F: Fn(&T) -> K,
    V: Fn(&T) -> f64,
{
    let mut groups = Groups::new();
    for item in items {
        groups.add(key(item), value(item));
    }
    groups
}

/// Hashable key for a floating point group value (e.g. an unemployment rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        // 0.0 and -0.0 compare equal and must land in the same group
        let value = if value == 0.0 { 0.0 } else { value };
        FloatKey(value.to_bits())
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_first_appearance_order() {
        let items = [("b", 1.0), ("a", 2.0), ("b", 3.0), ("c", 4.0)];
        let groups = group_by(&items, |i| i.0, |i| i.1);
        assert_eq!(groups.sums(), vec![("b", 4.0), ("a", 2.0), ("c", 4.0)]);
        assert_eq!(groups.means(), vec![("b", 2.0), ("a", 2.0), ("c", 4.0)]);
        assert_eq!(groups.counts(), vec![("b", 2), ("a", 1), ("c", 1)]);
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let items: [(&str, f64); 0] = [];
        let groups = group_by(&items, |i| i.0, |i| i.1);
        assert!(groups.is_empty());
        assert!(groups.sums().is_empty());
        assert!(groups.means().is_empty());
        assert!(groups.counts().is_empty());
    }

    #[test]
    fn float_keys_merge_signed_zero() {
        assert_eq!(FloatKey::new(0.0), FloatKey::new(-0.0));
        assert_eq!(FloatKey::new(5.4).value(), 5.4);
        assert_ne!(FloatKey::new(5.4), FloatKey::new(5.5));
    }
}
