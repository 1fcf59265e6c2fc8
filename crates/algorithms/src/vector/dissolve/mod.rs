//! Dissolve: merge features that share geometry kind and match-column values
//!
//! One pass over the input:
//! 1. group features by kind (area, line, point), then by match-column key
//! 2. per group, aggregate attributes (match values, `Count`, operator columns)
//! 3. per group, merge geometries with the strategy for its kind
//! 4. emit one feature per group that still has a geometry
//!
//! Output order is area groups, then line groups, then point groups; within a
//! kind, groups appear in the order their first member was seen.

mod aggregate;
mod group;
mod merge;
mod params;

pub use aggregate::{aggregate, evaluate, COUNT_COLUMN};
pub use group::{group_features, Group, GroupKey, Grouping, Member};
pub use merge::{check_area, merge, merge_areas, merge_lines, merge_points, InvalidGeometry, MergeOutcome};
pub use params::{AggregateOp, ColumnType, DissolveParams, OperatorPair, OutputColumn};

use geodissolve_core::{Algorithm, Error, Feature, FeatureCollection, Result};
use tracing::{debug, warn};

/// Result of a dissolve run
#[derive(Debug, Clone, Default)]
pub struct DissolveOutput {
    /// One feature per emitted group
    pub features: FeatureCollection,
    /// Area features excluded from their group's union
    pub invalid: Vec<InvalidGeometry>,
    /// Input features left out because their geometry is missing or of no
    /// recognised kind
    pub dropped: usize,
}

/// Dissolve features by match-column values.
///
/// Never fails: unparsable numbers aggregate as zero, invalid area
/// geometries are reported in [`DissolveOutput::invalid`], and groups whose
/// merge yields no geometry are skipped.
///
/// # Arguments
/// * `features` - Input features, in the order that First/Last should observe
/// * `params` - Match columns and aggregation directives
///
/// # Example
/// ```ignore
/// let params = DissolveParams::new(["Type"])
///     .with_operator(OperatorPair::new("Population", "Integer", AggregateOp::Sum));
/// let output = dissolve(&features, &params);
/// for feature in &output.features {
///     println!("{:?}", feature.properties);
/// }
/// ```
pub fn dissolve(features: &[Feature], params: &DissolveParams) -> DissolveOutput {
    let grouping = group_features(features, &params.match_columns);
    let dropped = grouping.dropped.len();
    if dropped > 0 {
        debug!("{} feature(s) without a recognised geometry kind left out", dropped);
    }

    let mut output = DissolveOutput {
        features: FeatureCollection::new(),
        invalid: Vec::new(),
        dropped,
    };

    for group in grouping.into_groups() {
        let properties = aggregate(&group.members, &params.match_columns, &params.operators);
        let merged = merge(&group.members, group.kind);

        for bad in &merged.invalid {
            warn!("Invalid {} geometry skipped: {}", group.kind, bad);
        }
        output.invalid.extend(merged.invalid);

        match merged.geometry {
            Some(geometry) => {
                debug!(
                    "{} group {:?}: {} member(s) dissolved",
                    group.kind,
                    group.key.values(),
                    group.len()
                );
                output.features.push(Feature {
                    geometry: Some(geometry),
                    properties,
                    id: None,
                });
            }
            None => debug!(
                "{} group {:?}: nothing left to merge, no output feature",
                group.kind,
                group.key.values()
            ),
        }
    }

    output
}

/// [`dissolve`] behind the [`Algorithm`] trait. Parameters are validated
/// before running.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dissolve;

impl Algorithm for Dissolve {
    type Input = FeatureCollection;
    type Output = DissolveOutput;
    type Params = DissolveParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "Dissolve"
    }

    fn description(&self) -> &'static str {
        "Merge features sharing geometry kind and attribute values, aggregating the other columns"
    }

    fn execute(&self, input: FeatureCollection, params: DissolveParams) -> Result<DissolveOutput> {
        params.validate()?;
        Ok(dissolve(input.as_slice(), &params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, LineString, Point, Polygon};

    fn square(x: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0), (x, 0.0)]),
            vec![],
        )
    }

    #[test]
    fn test_dissolve_emission_order() {
        let features = vec![
            Feature::new(Point::new(0.0, 0.0)).with_property("T", "p"),
            Feature::new(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)])).with_property("T", "l"),
            Feature::new(square(0.0)).with_property("T", "b"),
            Feature::new(square(2.0)).with_property("T", "a"),
        ];

        let output = dissolve(&features, &DissolveParams::new(["T"]));
        let keys: Vec<&str> = output.features.iter().map(|f| f.get_property("T").unwrap()).collect();
        assert_eq!(keys, vec!["b", "a", "l", "p"]);
        assert!(matches!(output.features.features[0].geometry, Some(Geometry::MultiPolygon(_))));
        assert!(matches!(output.features.features[2].geometry, Some(Geometry::MultiLineString(_))));
        assert!(matches!(output.features.features[3].geometry, Some(Geometry::MultiPoint(_))));
    }

    #[test]
    fn test_dissolve_empty_input() {
        let output = dissolve(&[], &DissolveParams::new(["T"]));
        assert!(output.features.is_empty());
        assert!(output.invalid.is_empty());
        assert_eq!(output.dropped, 0);
    }

    #[test]
    fn test_algorithm_validates_params() {
        let input = FeatureCollection::from(vec![Feature::new(Point::new(0.0, 0.0))]);
        let err = Dissolve.execute(input.clone(), DissolveParams::new(["T", "T"]));
        assert!(matches!(err, Err(Error::InvalidParameter { .. })));

        let output = Dissolve.execute_default(input).unwrap();
        assert_eq!(output.features.len(), 1);
        assert_eq!(output.features.features[0].get_property(COUNT_COLUMN), Some("1"));
        assert_eq!(Dissolve.name(), "Dissolve");
    }
}
