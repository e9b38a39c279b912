//! Label table exported alongside the bytecode.
//!
//! Maps each label to the 0-based index of its record in the full record
//! sequence, padding records included. Indices are record positions, not
//! byte offsets. The compiler itself never reads the table back.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: BTreeMap<String, usize>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points `name` at record `index`, returning the index it replaced.
    pub fn define(&mut self, name: impl Into<String>, index: usize) -> Option<usize> {
        self.labels.insert(name.into(), index)
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().map(|(name, &index)| (name.as_str(), index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let mut labels = LabelTable::new();
        assert!(labels.is_empty());
        assert_eq!(labels.define("start", 0), None);
        assert_eq!(labels.get("start"), Some(0));
        assert_eq!(labels.get("missing"), None);
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn redefinition_overwrites() {
        let mut labels = LabelTable::new();
        labels.define("swap", 1);
        assert_eq!(labels.define("swap", 4), Some(1));
        assert_eq!(labels.get("swap"), Some(4));
        assert_eq!(labels.len(), 1);
    }

    #[test]
    fn iter_is_sorted_by_name() {
        let mut labels = LabelTable::new();
        labels.define("b", 2);
        labels.define("a", 5);
        labels.define("c", 0);
        let names: Vec<_> = labels.iter().collect();
        assert_eq!(names, vec![("a", 5), ("b", 2), ("c", 0)]);
    }
}
