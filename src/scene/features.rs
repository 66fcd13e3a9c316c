use serde::ser::SerializeMap;

/// A single published feature value.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Free-form label.
    Text(String),
    /// Yes/no feature.
    Bool(bool),
    /// Count-like feature.
    Int(i64),
}

impl FeatureValue {
    /// Build a [`FeatureValue::Text`].
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Text(s) => f.write_str(s),
            FeatureValue::Bool(b) => write!(f, "{b}"),
            FeatureValue::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Ordered label-name to value mapping describing one artwork.
///
/// Insertion order is kept for display and for the serialized JSON object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureLabels {
    entries: Vec<(String, FeatureValue)>,
}

impl FeatureLabels {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a label, keeping the original position on replace.
    pub fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
            return;
        }
        self.entries.push((name, value));
    }

    /// Look a label up by name.
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Labels in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when there are no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compact JSON object, keys in insertion order.
    pub fn to_json_string(&self) -> String {
        // Serializing strings, bools and integers into a Vec cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl serde::Serialize for FeatureLabels {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/features.rs"]
mod tests;
