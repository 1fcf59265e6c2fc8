//! Geometry kind classification and part extraction
//!
//! Dissolve only distinguishes three kinds of geometry. Everything else
//! (geometry collections) has no kind and is left out of grouping.

use geo_types::{Geometry, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three geometry kinds recognised by dissolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Polygon, MultiPolygon, Rect, Triangle
    Area,
    /// Line, LineString, MultiLineString
    Line,
    /// Point, MultiPoint
    Point,
}

impl GeometryKind {
    /// All kinds, in dissolve emission order
    pub const ALL: [GeometryKind; 3] = [GeometryKind::Area, GeometryKind::Line, GeometryKind::Point];

    /// Classify a geometry. Returns `None` for geometry collections.
    pub fn of(geom: &Geometry<f64>) -> Option<Self> {
        match geom {
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => Some(GeometryKind::Area),
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                Some(GeometryKind::Line)
            }
            Geometry::Point(_) | Geometry::MultiPoint(_) => Some(GeometryKind::Point),
            Geometry::GeometryCollection(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeometryKind::Area => "area",
            GeometryKind::Line => "line",
            GeometryKind::Point => "point",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Constituent polygons of an area geometry (empty for other kinds)
pub fn polygons(geom: &Geometry<f64>) -> Vec<Polygon<f64>> {
    match geom {
        Geometry::Polygon(p) => vec![p.clone()],
        Geometry::MultiPolygon(mp) => mp.0.clone(),
        Geometry::Rect(r) => vec![r.to_polygon()],
        Geometry::Triangle(t) => vec![t.to_polygon()],
        _ => Vec::new(),
    }
}

/// Constituent line strings of a line geometry (empty for other kinds).
///
/// A `Line` segment becomes a two-point line string.
pub fn line_strings(geom: &Geometry<f64>) -> Vec<LineString<f64>> {
    match geom {
        Geometry::Line(l) => vec![LineString::from(vec![l.start, l.end])],
        Geometry::LineString(ls) => vec![ls.clone()],
        Geometry::MultiLineString(mls) => mls.0.clone(),
        _ => Vec::new(),
    }
}

/// Constituent points of a point geometry (empty for other kinds)
pub fn points(geom: &Geometry<f64>) -> Vec<Point<f64>> {
    match geom {
        Geometry::Point(p) => vec![*p],
        Geometry::MultiPoint(mp) => mp.0.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{
        coord, GeometryCollection, Line, MultiLineString, MultiPoint, MultiPolygon, Rect, Triangle,
    };

    fn square(x: f64, y: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(x, y), (x + 1.0, y), (x + 1.0, y + 1.0), (x, y + 1.0), (x, y)]),
            vec![],
        )
    }

    #[test]
    fn test_classify_area() {
        assert_eq!(GeometryKind::of(&Geometry::Polygon(square(0.0, 0.0))), Some(GeometryKind::Area));
        let mp = MultiPolygon::new(vec![square(0.0, 0.0), square(2.0, 0.0)]);
        assert_eq!(GeometryKind::of(&Geometry::MultiPolygon(mp)), Some(GeometryKind::Area));
        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
        assert_eq!(GeometryKind::of(&Geometry::Rect(rect)), Some(GeometryKind::Area));
    }

    #[test]
    fn test_classify_line_and_point() {
        let seg = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 });
        assert_eq!(GeometryKind::of(&Geometry::Line(seg)), Some(GeometryKind::Line));
        assert_eq!(
            GeometryKind::of(&Geometry::MultiPoint(MultiPoint::new(vec![]))),
            Some(GeometryKind::Point)
        );
    }

    #[test]
    fn test_collection_has_no_kind() {
        let gc = GeometryCollection::new_from(vec![Geometry::Point(Point::new(0.0, 0.0))]);
        assert_eq!(GeometryKind::of(&Geometry::GeometryCollection(gc)), None);
    }

    #[test]
    fn test_polygon_parts() {
        let mp = MultiPolygon::new(vec![square(0.0, 0.0), square(2.0, 0.0)]);
        assert_eq!(polygons(&Geometry::MultiPolygon(mp)).len(), 2);

        let tri = Triangle::new(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 },
        );
        let parts = polygons(&Geometry::Triangle(tri));
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].exterior().0.len(), 4);
    }

    #[test]
    fn test_line_parts() {
        let seg = Line::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 3.0, y: 4.0 });
        let parts = line_strings(&Geometry::Line(seg));
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].0.len(), 2);

        let mls = MultiLineString::new(vec![
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0)]),
            LineString::from(vec![(0.0, 1.0), (1.0, 1.0)]),
        ]);
        assert_eq!(line_strings(&Geometry::MultiLineString(mls)).len(), 2);
    }

    #[test]
    fn test_point_parts_of_other_kind_are_empty() {
        assert!(points(&Geometry::Polygon(square(0.0, 0.0))).is_empty());
        assert!(polygons(&Geometry::Point(Point::new(1.0, 1.0))).is_empty());
    }

    #[test]
    fn test_kind_serde_roundtrip() {
        let json = serde_json::to_string(&GeometryKind::Line).unwrap();
        assert_eq!(json, "\"Line\"");
        assert_eq!(GeometryKind::Area.to_string(), "area");
    }
}
