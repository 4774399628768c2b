//! Coordinate labels for named axes.

use crate::error::{Result, SeasonalityError};

/// Ordered mapping from axis name to its labels.
///
/// Axis sizes are the label counts. Insertion order is preserved so that
/// tensors built from coordinates have a predictable axis order.
///
/// # Example
///
/// ```
/// use anofox_seasonality::core::Coords;
///
/// let coords = Coords::new()
///     .with("hierarchy", ["A", "B", "C"])
///     .with("draw", 0..10);
///
/// assert_eq!(coords.size("hierarchy"), Some(3));
/// assert_eq!(coords.size("draw"), Some(10));
/// assert_eq!(coords.names().collect::<Vec<_>>(), vec!["hierarchy", "draw"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coords {
    entries: Vec<(String, Vec<String>)>,
}

impl Coords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an axis, builder style.
    pub fn with<I, T>(mut self, name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.insert(name, labels.into_iter().map(|l| l.to_string()).collect());
        self
    }

    /// Add an axis, replacing the labels of an existing axis in place.
    pub fn insert(&mut self, name: impl Into<String>, labels: Vec<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = labels,
            None => self.entries.push((name, labels)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, labels)| labels.as_slice())
    }

    /// Number of labels on the axis.
    pub fn size(&self, name: &str) -> Option<usize> {
        self.get(name).map(|labels| labels.len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Axis names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(n, labels)| (n.as_str(), labels.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sizes of `dims`, failing on the first axis without labels.
    pub fn shape_of<S: AsRef<str>>(&self, dims: &[S]) -> Result<Vec<usize>> {
        dims.iter()
            .map(|dim| {
                let dim = dim.as_ref();
                self.size(dim)
                    .ok_or_else(|| SeasonalityError::MissingCoords(dim.to_string()))
            })
            .collect()
    }
}
