//! Series input: normalization of raw points and grouping classification.
//!
//! Raw input is heterogeneous: bare numbers, records carrying `value` plus
//! style keys, or sequences of those. It is normalized once at the boundary
//! into a [`Series`]; nothing downstream inspects raw shapes again.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Paint attributes, name to value, applied verbatim by the surface.
pub type Style = BTreeMap<String, Value>;

/// A single raw point as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPoint {
    /// A bare number.
    Number(f64),
    /// A record with a `value` field and arbitrary style keys.
    Record(Map<String, Value>),
}

impl From<f64> for RawPoint {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A top-level raw series entry: a point, or a group of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    /// Ungrouped point.
    Point(RawPoint),
    /// A group sharing one x position.
    Group(Vec<RawPoint>),
}

/// A normalized data point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    /// Bar value.
    pub value: f64,
    /// Style attributes carried alongside the value.
    #[serde(default)]
    pub style: Style,
}

impl DataPoint {
    /// A point without style.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value, style: Style::new() }
    }

    /// Add a style attribute.
    #[must_use]
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(key.into(), value.into());
        self
    }
}

/// `true` iff the first entry is itself a sequence.
#[must_use]
pub fn classify(entries: &[RawEntry]) -> bool {
    matches!(entries.first(), Some(RawEntry::Group(_)))
}

/// Normalize one raw point. `index` is its flattened position, for errors.
///
/// # Errors
///
/// Returns [`Error::MalformedDataPoint`] when a record lacks a numeric `value`.
pub fn normalize(point: &RawPoint, index: usize) -> Result<DataPoint> {
    match point {
        RawPoint::Number(value) => Ok(DataPoint::new(*value)),
        RawPoint::Record(record) => {
            let value = match record.get("value") {
                Some(v) => v.as_f64().ok_or_else(|| Error::MalformedDataPoint {
                    index,
                    reason: format!("`value` is not a number: {v}"),
                })?,
                None => {
                    return Err(Error::MalformedDataPoint {
                        index,
                        reason: "record has no `value` field".to_string(),
                    })
                }
            };
            let style = record
                .iter()
                .filter(|(k, _)| k.as_str() != "value")
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            Ok(DataPoint { value, style })
        }
    }
}

/// Normalized series, flat or grouped.
///
/// All groups of a grouped series have the same length.
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// One bar per element.
    Flat(Vec<DataPoint>),
    /// One group of adjacent bars per element.
    Grouped(Vec<Vec<DataPoint>>),
}

impl Default for Series {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl Series {
    /// Normalize raw entries, classifying the shape from the first entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if entries disagree with the first
    /// entry's shape or groups differ in length, and
    /// [`Error::MalformedDataPoint`] for a record without a numeric value.
    pub fn from_raw(entries: &[RawEntry]) -> Result<Self> {
        let mut index = 0;
        let mut next = |p: &RawPoint| {
            let point = normalize(p, index);
            index += 1;
            point
        };

        if !classify(entries) {
            let points = entries
                .iter()
                .map(|entry| match entry {
                    RawEntry::Point(p) => next(p),
                    RawEntry::Group(g) => Err(Error::ShapeMismatch {
                        context: "flat series element",
                        expected: 1,
                        actual: g.len(),
                    }),
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(Self::Flat(points));
        }

        let per_group = match entries.first() {
            Some(RawEntry::Group(g)) => g.len(),
            _ => 0,
        };
        let mut groups = Vec::with_capacity(entries.len());
        for entry in entries {
            let RawEntry::Group(group) = entry else {
                return Err(Error::ShapeMismatch {
                    context: "grouped series element",
                    expected: per_group,
                    actual: 1,
                });
            };
            if group.len() != per_group {
                return Err(Error::ShapeMismatch {
                    context: "grouped series element",
                    expected: per_group,
                    actual: group.len(),
                });
            }
            groups.push(group.iter().map(&mut next).collect::<Result<Vec<_>>>()?);
        }
        Ok(Self::Grouped(groups))
    }

    /// Parse and normalize a JSON series document.
    ///
    /// ```
    /// use bar_viz::data::Series;
    ///
    /// let series = Series::from_json(r##"[[1, 2], [3, {"value": 4, "fill": "#f00"}]]"##).unwrap();
    /// assert!(series.is_grouped());
    /// assert_eq!(series.bar_count(), 4);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeriesParse`] for invalid JSON, otherwise as [`Series::from_raw`].
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|e| Error::SeriesParse(e.to_string()))?;
        Self::from_raw(&entries)
    }

    /// Flat series of unstyled values.
    #[must_use]
    pub fn flat(values: &[f64]) -> Self {
        Self::Flat(values.iter().copied().map(DataPoint::new).collect())
    }

    /// Grouped series of unstyled values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the groups differ in length.
    pub fn grouped(groups: &[Vec<f64>]) -> Result<Self> {
        let entries: Vec<RawEntry> = groups
            .iter()
            .map(|g| RawEntry::Group(g.iter().copied().map(RawPoint::Number).collect()))
            .collect();
        Self::from_raw(&entries)
    }

    /// Whether each element is a group.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self, Self::Grouped(_))
    }

    /// Number of top-level elements (bars or groups).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(points) => points.len(),
            Self::Grouped(groups) => groups.len(),
        }
    }

    /// Whether there are no top-level elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bars per group; `None` for a flat series.
    #[must_use]
    pub fn per_group(&self) -> Option<usize> {
        match self {
            Self::Flat(_) => None,
            Self::Grouped(groups) => Some(groups.first().map_or(0, Vec::len)),
        }
    }

    /// Total number of bars.
    #[must_use]
    pub fn bar_count(&self) -> usize {
        match self {
            Self::Flat(points) => points.len(),
            Self::Grouped(groups) => groups.iter().map(Vec::len).sum(),
        }
    }

    /// All points left to right, groups flattened.
    pub fn iter_points(&self) -> impl Iterator<Item = &DataPoint> + '_ {
        let (flat, groups): (&[DataPoint], &[Vec<DataPoint>]) = match self {
            Self::Flat(points) => (points.as_slice(), &[]),
            Self::Grouped(groups) => (&[], groups.as_slice()),
        };
        flat.iter().chain(groups.iter().flatten())
    }

    /// Largest value, never below zero.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.iter_points().map(|p| p.value).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(json: Value) -> Vec<RawEntry> {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_classify_is_structural() {
        assert!(!classify(&raw(json!([1, 2, 3]))));
        assert!(classify(&raw(json!([[1, 2], [3, 4]]))));
        assert!(!classify(&[]));
        assert!(!classify(&raw(json!([{"value": 1}]))));
    }

    #[test]
    fn test_normalize_number() {
        let p = normalize(&RawPoint::Number(4.5), 0).unwrap();
        assert_eq!(p, DataPoint::new(4.5));
        assert!(p.style.is_empty());
    }

    #[test]
    fn test_normalize_record_strips_value() {
        let entries = raw(json!([{"value": 7, "fill": "#f00", "opacity": 0.5}]));
        let RawEntry::Point(point) = &entries[0] else { panic!("expected a point") };
        let p = normalize(point, 0).unwrap();
        assert_eq!(p.value, 7.0);
        assert_eq!(p.style.len(), 2);
        assert_eq!(p.style["fill"], json!("#f00"));
        assert!(!p.style.contains_key("value"));
    }

    #[test]
    fn test_normalize_record_without_value() {
        let entries = raw(json!([1, {"fill": "red"}]));
        let err = Series::from_raw(&entries).unwrap_err();
        assert!(matches!(err, Error::MalformedDataPoint { index: 1, .. }));
    }

    #[test]
    fn test_normalize_non_numeric_value() {
        let err = Series::from_json(r#"[[1, 2], [3, {"value": "4"}]]"#).unwrap_err();
        assert!(matches!(err, Error::MalformedDataPoint { index: 3, .. }));
    }

    #[test]
    fn test_grouped_length_mismatch() {
        let err = Series::grouped(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_mixed_shapes_rejected() {
        assert!(matches!(
            Series::from_json("[1, [2, 3]]"),
            Err(Error::ShapeMismatch { expected: 1, actual: 2, .. })
        ));
        assert!(matches!(
            Series::from_json("[[1, 2], 3]"),
            Err(Error::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(Series::from_json(r#"["a"]"#), Err(Error::SeriesParse(_))));
    }

    #[test]
    fn test_series_accessors() {
        let s = Series::grouped(&[vec![1.0, 9.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert!(s.is_grouped());
        assert_eq!(s.len(), 2);
        assert_eq!(s.per_group(), Some(3));
        assert_eq!(s.bar_count(), 6);
        assert_eq!(s.max_value(), 9.0);
        let values: Vec<f64> = s.iter_points().map(|p| p.value).collect();
        assert_eq!(values, vec![1.0, 9.0, 3.0, 4.0, 5.0, 6.0]);

        let f = Series::flat(&[5.0, 10.0]);
        assert_eq!(f.per_group(), None);
        assert_eq!(f.bar_count(), 2);
        assert!(Series::default().is_empty());
        assert_eq!(Series::default().max_value(), 0.0);
    }
}
