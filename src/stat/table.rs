//! A small ordered map from stats to integer values.
//!
//! Used for base stats, stat boosts and the like. Tables hold a handful of
//! entries so lookups are linear scans and insertion order is preserved.
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Identifies a stat definition, usually by asset path.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StatId(String);

impl StatId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StatId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StatTableEntry {
    pub stat: StatId,
    pub value: i32,
}

impl StatTableEntry {
    pub fn new(stat: StatId, value: i32) -> Self {
        Self { stat, value }
    }
}

/// Invariant: no two entries share a stat.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StatTable {
    entries: Vec<StatTableEntry>,
}

impl StatTable {
    /// One entry per stat, all at `default_value`.
    pub fn with_stats(stats: &[StatId], default_value: i32) -> Self {
        let mut out = Self::default();
        out.rebuild(stats, default_value, false);
        out
    }

    /// Build from raw entries. A repeated stat overwrites the value of its
    /// first entry.
    pub fn from_entries(entries: impl IntoIterator<Item = StatTableEntry>) -> Self {
        let mut out = Self::default();
        for entry in entries {
            if out.try_set(&entry.stat, entry.value) {
                tracing::warn!("duplicate stat {} in stat table entries", entry.stat);
                continue;
            }
            out.entries.push(entry);
        }
        out
    }

    /// Replace the entries with one per stat in `stats`. With
    /// `keep_existing`, stats already in the table keep their value and new
    /// ones start at `default_value`.
    pub fn rebuild(&mut self, stats: &[StatId], default_value: i32, keep_existing: bool) {
        let mut entries = Vec::with_capacity(stats.len());
        for stat in stats {
            if entries.iter().any(|e: &StatTableEntry| e.stat == *stat) {
                continue;
            }
            let value = if keep_existing {
                self.try_get(stat).unwrap_or(default_value)
            } else {
                default_value
            };
            entries.push(StatTableEntry::new(stat.clone(), value));
        }
        self.entries = entries;
    }

    pub fn is_valid(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn has(&self, stat: &StatId) -> bool {
        self.entries.iter().any(|e| e.stat == *stat)
    }

    pub fn get_mut(&mut self, stat: &StatId) -> Option<&mut i32> {
        self.entries
            .iter_mut()
            .find(|e| e.stat == *stat)
            .map(|e| &mut e.value)
    }

    pub fn try_get(&self, stat: &StatId) -> Option<i32> {
        self.entries.iter().find(|e| e.stat == *stat).map(|e| e.value)
    }

    /// Update an existing stat. Returns false if the stat is not in the
    /// table; nothing is inserted.
    pub fn try_set(&mut self, stat: &StatId, value: i32) -> bool {
        if let Some(current) = self.get_mut(stat) {
            *current = value;
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StatId, i32)> {
        self.entries.iter().map(|e| (&e.stat, e.value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&StatId, &mut i32)> {
        self.entries.iter_mut().map(|e| (&e.stat, &mut e.value))
    }

    pub fn entries(&self) -> &[StatTableEntry] {
        &self.entries
    }

    /// True when no stat appears twice.
    pub fn validate(&self) -> bool {
        for (i, a) in self.entries.iter().enumerate() {
            if self.entries[i + 1..].iter().any(|b| b.stat == a.stat) {
                return false;
            }
        }
        true
    }

    pub fn values(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Sum of all values, saturating at the i32 bounds.
    pub fn total(&self) -> i32 {
        self.entries
            .iter()
            .fold(0i32, |total, e| total.saturating_add(e.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn average(&self) -> Option<f32> {
        if self.entries.is_empty() {
            return None;
        }
        let total: f32 = self.entries.iter().map(|e| e.value as f32).sum();
        Some(total / self.entries.len() as f32)
    }

    /// i32::MIN for an empty table.
    pub fn max_value(&self) -> i32 {
        self.entries.iter().map(|e| e.value).max().unwrap_or(i32::MIN)
    }

    /// i32::MAX for an empty table.
    pub fn min_value(&self) -> i32 {
        self.entries.iter().map(|e| e.value).min().unwrap_or(i32::MAX)
    }

    /// The highest value and every stat that has it, in table order.
    pub fn max_stats(&self) -> (i32, Vec<StatId>) {
        self.extreme_stats(i32::MIN, |value, best| value > best)
    }

    /// The lowest value and every stat that has it, in table order.
    pub fn min_stats(&self) -> (i32, Vec<StatId>) {
        self.extreme_stats(i32::MAX, |value, best| value < best)
    }

    fn extreme_stats(&self, start: i32, better: impl Fn(i32, i32) -> bool) -> (i32, Vec<StatId>) {
        let mut best = start;
        let mut stats = Vec::new();
        for entry in &self.entries {
            if better(entry.value, best) {
                best = entry.value;
                stats.clear();
            } else if entry.value != best {
                continue;
            }
            stats.push(entry.stat.clone());
        }
        (best, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<StatId> {
        names.iter().map(|n| StatId::from(*n)).collect()
    }

    fn sample() -> StatTable {
        StatTable::from_entries([
            StatTableEntry::new("hp".into(), 45),
            StatTableEntry::new("attack".into(), 49),
            StatTableEntry::new("defense".into(), 49),
            StatTableEntry::new("speed".into(), 45),
        ])
    }

    #[test]
    fn with_stats_uses_default() {
        let table = StatTable::with_stats(&ids(&["hp", "attack"]), 10);
        assert_eq!(table.len(), 2);
        assert_eq!(table.values(), vec![10, 10]);
        assert!(table.is_valid());
        assert!(StatTable::default().is_empty());
        assert!(!StatTable::default().is_valid());
    }

    #[test]
    fn rebuild_keeps_existing_values() {
        let mut table = sample();
        table.rebuild(&ids(&["speed", "luck", "hp"]), 1, true);
        assert_eq!(
            table.iter().map(|(s, v)| (s.as_str().to_string(), v)).collect::<Vec<_>>(),
            vec![
                ("speed".to_string(), 45),
                ("luck".to_string(), 1),
                ("hp".to_string(), 45)
            ]
        );
        table.rebuild(&ids(&["speed"]), 1, false);
        assert_eq!(table.values(), vec![1]);
    }

    #[test]
    fn duplicates_overwrite_and_validate() {
        let table = StatTable::from_entries([
            StatTableEntry::new("hp".into(), 1),
            StatTableEntry::new("mp".into(), 2),
            StatTableEntry::new("hp".into(), 3),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.try_get(&"hp".into()), Some(3));
        assert!(table.validate());

        let broken: StatTable = json5::from_str(
            r#"{"entries":[{"stat":"hp","value":1},{"stat":"hp","value":2}]}"#,
        )
        .unwrap();
        assert!(!broken.validate());
    }

    #[test]
    fn get_and_set() {
        let mut table = sample();
        assert!(table.has(&"attack".into()));
        assert!(!table.has(&"luck".into()));
        assert_eq!(table.try_get(&"luck".into()), None);
        assert!(table.try_set(&"attack".into(), 60));
        assert!(!table.try_set(&"luck".into(), 5));
        assert_eq!(table.len(), 4);
        *table.get_mut(&"hp".into()).unwrap() += 5;
        assert_eq!(table.try_get(&"hp".into()), Some(50));
        assert!(table.get_mut(&"luck".into()).is_none());
        for (_, value) in table.iter_mut() {
            *value *= 2;
        }
        assert_eq!(table.values(), vec![100, 120, 98, 90]);
    }

    #[test]
    fn aggregates() {
        let table = sample();
        assert_eq!(table.total(), 188);
        assert_eq!(table.average(), Some(47.0));
        assert_eq!(table.max_value(), 49);
        assert_eq!(table.min_value(), 45);
        assert_eq!(table.max_stats(), (49, ids(&["attack", "defense"])));
        assert_eq!(table.min_stats(), (45, ids(&["hp", "speed"])));
    }

    #[test]
    fn total_saturates() {
        let high = StatTable::from_entries([
            StatTableEntry::new("a".into(), i32::MAX),
            StatTableEntry::new("b".into(), 1),
        ]);
        assert_eq!(high.total(), i32::MAX);
        let low = StatTable::from_entries([
            StatTableEntry::new("a".into(), i32::MIN),
            StatTableEntry::new("b".into(), -1),
            StatTableEntry::new("c".into(), 5),
        ]);
        assert_eq!(low.total(), i32::MIN + 5);
    }

    #[test]
    fn empty_aggregates() {
        let table = StatTable::default();
        assert_eq!(table.total(), 0);
        assert_eq!(table.average(), None);
        assert_eq!(table.max_value(), i32::MIN);
        assert_eq!(table.min_value(), i32::MAX);
        assert_eq!(table.max_stats(), (i32::MIN, vec![]));
        assert_eq!(table.min_stats(), (i32::MAX, vec![]));
    }

    #[test]
    fn reset_clears() {
        let mut table = sample();
        table.reset();
        assert!(table.is_empty());
    }

    #[test]
    fn serializes_entries_in_order() {
        let table = sample();
        let bytes = bincode::serialize(&table).unwrap();
        let restored: StatTable = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored.entries(), table.entries());
    }
}
