//! Named collection of sampled tensors.

use crate::core::{Coords, NamedTensor};
use crate::error::{Result, SeasonalityError};
use std::collections::BTreeMap;

/// Sampled variables keyed by name, together with the coordinates they
/// were sampled over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    variables: BTreeMap<String, NamedTensor>,
    coords: Coords,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty dataset that remembers `coords`.
    pub fn with_coords(coords: Coords) -> Self {
        Self {
            variables: BTreeMap::new(),
            coords,
        }
    }

    /// Add a variable. Names are unique.
    pub fn insert(&mut self, name: impl Into<String>, tensor: NamedTensor) -> Result<()> {
        let name = name.into();
        if self.variables.contains_key(&name) {
            return Err(SeasonalityError::DuplicateVariable(name));
        }
        self.variables.insert(name, tensor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NamedTensor> {
        self.variables.get(name)
    }

    /// Like [`Self::get`], but a missing variable is an error.
    pub fn require(&self, name: &str) -> Result<&NamedTensor> {
        self.get(name)
            .ok_or_else(|| SeasonalityError::MissingVariable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn coords(&self) -> &Coords {
        &self.coords
    }

    pub(crate) fn coords_mut(&mut self) -> &mut Coords {
        &mut self.coords
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut data = Dataset::new();
        data.insert("beta", NamedTensor::scalar(1.0)).unwrap();

        assert!(data.contains("beta"));
        assert_eq!(data.len(), 1);
        assert_eq!(data.require("beta").unwrap(), &NamedTensor::scalar(1.0));
        assert_eq!(
            data.require("gamma").unwrap_err(),
            SeasonalityError::MissingVariable("gamma".to_string())
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut data = Dataset::new();
        data.insert("beta", NamedTensor::scalar(1.0)).unwrap();
        let err = data.insert("beta", NamedTensor::scalar(2.0)).unwrap_err();
        assert_eq!(err, SeasonalityError::DuplicateVariable("beta".to_string()));
    }

    #[test]
    fn keeps_coords() {
        let data = Dataset::with_coords(Coords::new().with("hierarchy", ["A"]));
        assert!(data.is_empty());
        assert_eq!(data.coords().size("hierarchy"), Some(1));
    }
}
