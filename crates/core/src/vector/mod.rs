//! Vector data structures
//!
//! - Feature: geometry + string-encoded attributes
//! - FeatureCollection: ordered collection of features
//! - GeometryKind: area / line / point classification and part extraction

mod kind;

pub use kind::{line_strings, points, polygons, GeometryKind};

use geo_types::Geometry;
use std::collections::HashMap;

/// A geographic feature with geometry and attributes.
///
/// Attribute values are kept in their string encoding; numeric
/// interpretation is up to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Option<Geometry<f64>>,
    /// Feature attributes (column name -> value)
    pub properties: HashMap<String, String>,
    /// Optional feature ID
    pub id: Option<String>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            properties: HashMap::new(),
            id: None,
        }
    }

    /// Create a feature with no geometry
    pub fn empty() -> Self {
        Self {
            geometry: None,
            properties: HashMap::new(),
            id: None,
        }
    }

    /// Builder-style ID setter
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder-style attribute setter
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Kind of this feature's geometry, if it has a recognized one
    pub fn kind(&self) -> Option<GeometryKind> {
        self.geometry.as_ref().and_then(GeometryKind::of)
    }
}

/// Collection of features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self { features: Vec::new() }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn as_slice(&self) -> &[Feature] {
        &self.features
    }

    /// Number of features per geometry kind, plus the count of features
    /// whose geometry is missing or of no recognized kind.
    pub fn kind_counts(&self) -> (HashMap<GeometryKind, usize>, usize) {
        let mut counts = HashMap::new();
        let mut unrecognized = 0;
        for feature in &self.features {
            match feature.kind() {
                Some(kind) => *counts.entry(kind).or_insert(0) += 1,
                None => unrecognized += 1,
            }
        }
        (counts, unrecognized)
    }
}

impl From<Vec<Feature>> for FeatureCollection {
    fn from(features: Vec<Feature>) -> Self {
        Self { features }
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            features: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{point, GeometryCollection, LineString, Point};

    #[test]
    fn test_feature_builder() {
        let f = Feature::new(Point::new(1.0, 2.0))
            .with_id("42")
            .with_property("Type", "Residential");

        assert_eq!(f.id.as_deref(), Some("42"));
        assert_eq!(f.get_property("Type"), Some("Residential"));
        assert_eq!(f.get_property("type"), None);
        assert_eq!(f.kind(), Some(GeometryKind::Point));
    }

    #[test]
    fn test_empty_feature_has_no_kind() {
        assert_eq!(Feature::empty().kind(), None);
    }

    #[test]
    fn test_kind_counts() {
        let fc: FeatureCollection = vec![
            Feature::new(point!(x: 0.0, y: 0.0)),
            Feature::new(point!(x: 1.0, y: 0.0)),
            Feature::new(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)])),
            Feature::new(Geometry::GeometryCollection(GeometryCollection::<f64>::default())),
            Feature::empty(),
        ]
        .into();

        let (counts, unrecognized) = fc.kind_counts();
        assert_eq!(counts.get(&GeometryKind::Point), Some(&2));
        assert_eq!(counts.get(&GeometryKind::Line), Some(&1));
        assert_eq!(counts.get(&GeometryKind::Area), None);
        assert_eq!(unrecognized, 2);
    }
}
