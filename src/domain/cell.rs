use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single spreadsheet cell after tabulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Build a cell from raw text. The text is trimmed and kept as a number
    /// only when the number prints back to the very same text, so values such
    /// as `0558112233` keep their leading zero.
    pub fn from_raw_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() && n.to_string() == trimmed {
                return CellValue::Number(n);
            }
        }
        CellValue::Text(trimmed.to_string())
    }

    /// Canonical stored form: text trimmed, numeric-looking text promoted.
    pub fn normalized(&self) -> Self {
        match self {
            CellValue::Text(s) => CellValue::from_raw_text(s),
            other => other.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.trim().is_empty())
    }

    /// Trimmed textual form used for identity fields and comparisons.
    pub fn as_trimmed_string(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{}", b),
            // f64 Display already drops a zero fraction (423901.0 -> "423901")
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// Insertion-ordered bag of header -> cell pairs.
///
/// Keys are whatever headers survived resolution, so there is no fixed
/// schema. Serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailBag {
    entries: Vec<(String, CellValue)>,
}

impl DetailBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for DetailBag {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        let mut bag = DetailBag::new();
        for (k, v) in iter {
            bag.insert(k, v);
        }
        bag
    }
}

impl Serialize for DetailBag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct DetailBagVisitor;

impl<'de> Visitor<'de> for DetailBagVisitor {
    type Value = DetailBag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of header names to scalar cell values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut bag = DetailBag::new();
        while let Some((key, value)) = access.next_entry::<String, CellValue>()? {
            bag.insert(key, value);
        }
        Ok(bag)
    }
}

impl<'de> Deserialize<'de> for DetailBag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DetailBagVisitor)
    }
}
