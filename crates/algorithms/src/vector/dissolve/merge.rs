//! Geometry merging per group
//!
//! - Area: validity check per member (in parallel), then polygon union
//! - Line: collect constituent line strings into a multi-line
//! - Point: collect constituent points into a multi-point

use geo::{unary_union, Geometry, LineString, MultiLineString, MultiPoint, Polygon, Validation};
use geodissolve_core::vector::{line_strings, points, polygons};
use geodissolve_core::GeometryKind;
use std::fmt;

use super::group::Member;
use crate::maybe_rayon::*;

/// An area feature that failed the validity check and was left out of its
/// group's union
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidGeometry {
    /// Position of the feature in the dissolve input
    pub index: usize,
    /// Feature ID, if the feature has one
    pub id: Option<String>,
    /// Reason reported by the validity check
    pub message: String,
}

impl fmt::Display for InvalidGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "feature {} (#{}): {}", id, self.index, self.message),
            None => write!(f, "feature #{}: {}", self.index, self.message),
        }
    }
}

/// Merged geometry of a group plus any members rejected on the way
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// `None` when nothing survived the merge and the group emits no feature
    pub geometry: Option<Geometry<f64>>,
    pub invalid: Vec<InvalidGeometry>,
}

/// Merge the geometries of one group with the strategy for its kind.
pub fn merge(members: &[Member<'_>], kind: GeometryKind) -> MergeOutcome {
    match kind {
        GeometryKind::Area => merge_areas(members),
        GeometryKind::Line => MergeOutcome {
            geometry: merge_lines(members).map(Geometry::MultiLineString),
            invalid: Vec::new(),
        },
        GeometryKind::Point => MergeOutcome {
            geometry: Some(Geometry::MultiPoint(merge_points(members))),
            invalid: Vec::new(),
        },
    }
}

/// Check that an area geometry is valid (simple rings, no self-intersections,
/// holes inside their shell).
pub fn check_area(geom: &Geometry<f64>) -> Result<(), String> {
    geom.check_validation().map_err(|e| e.to_string())
}

/// Union the valid members of an area group.
///
/// Members are validated independently and in parallel; invalid ones are
/// reported in input order and excluded. Returns no geometry if none survive.
pub fn merge_areas(members: &[Member<'_>]) -> MergeOutcome {
    let checked: Vec<Result<&Geometry<f64>, InvalidGeometry>> = members
        .into_par_iter()
        .filter_map(|m| {
            let geom = m.feature.geometry.as_ref()?;
            Some(check_area(geom).map(|_| geom).map_err(|message| InvalidGeometry {
                index: m.index,
                id: m.feature.id.clone(),
                message,
            }))
        })
        .collect();

    let mut valid: Vec<Polygon<f64>> = Vec::new();
    let mut invalid = Vec::new();
    for outcome in checked {
        match outcome {
            Ok(geom) => valid.extend(polygons(geom)),
            Err(bad) => invalid.push(bad),
        }
    }

    let geometry = if valid.is_empty() {
        None
    } else {
        Some(Geometry::MultiPolygon(unary_union(&valid)))
    };

    MergeOutcome { geometry, invalid }
}

/// Concatenate the line strings of a line group.
///
/// Degenerate line strings (fewer than two distinct coordinates, so zero
/// length) are skipped. Returns `None` if no line string remains.
pub fn merge_lines(members: &[Member<'_>]) -> Option<MultiLineString<f64>> {
    let lines: Vec<LineString<f64>> = members
        .iter()
        .filter_map(|m| m.feature.geometry.as_ref())
        .flat_map(line_strings)
        .filter(|ls| !is_degenerate(ls))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(MultiLineString::new(lines))
    }
}

/// A line string is degenerate when all of its coordinates coincide
fn is_degenerate(ls: &LineString<f64>) -> bool {
    match ls.0.first() {
        Some(first) => ls.0.iter().all(|c| c == first),
        None => true,
    }
}

/// Collect the points of a point group. Always returns a geometry, even an
/// empty one.
pub fn merge_points(members: &[Member<'_>]) -> MultiPoint<f64> {
    MultiPoint::new(
        members
            .iter()
            .filter_map(|m| m.feature.geometry.as_ref())
            .flat_map(points)
            .collect(),
    )
}
