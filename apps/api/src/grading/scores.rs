use serde::ser::{Serialize, SerializeMap, Serializer};

/// Category name → integer score, in the order the model emitted them.
///
/// Values are not clamped to the rubric bounds; see `Rubric::out_of_range`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreMapping {
    entries: Vec<(String, i64)>,
}

impl ScoreMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `category` to `score`. A repeated category keeps its first position.
    pub fn insert(&mut self, category: impl Into<String>, score: i64) {
        let category = category.into();
        match self.entries.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((category, score)),
        }
    }

    pub fn get(&self, category: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, score)| *score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.entries
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all scores. `None` if the sum does not fit in an `i64`.
    pub fn total(&self) -> Option<i64> {
        self.entries
            .iter()
            .try_fold(0i64, |acc, (_, score)| acc.checked_add(*score))
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ScoreMapping {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (category, score) in iter {
            mapping.insert(category, score);
        }
        mapping
    }
}

impl Serialize for ScoreMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, score) in &self.entries {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}
