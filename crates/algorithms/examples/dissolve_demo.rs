//! Dissolve a handful of land-use parcels by type and print the result.
//!
//! Run with: cargo run -p geodissolve-algorithms --example dissolve_demo

use geo::{Area, LineString, Polygon};
use geodissolve_algorithms::prelude::*;

fn parcel(x: f64, land_use: &str, population: &str) -> Feature {
    let poly = Polygon::new(
        LineString::from(vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0), (x, 0.0)]),
        vec![],
    );
    Feature::new(poly)
        .with_property("LandUse", land_use)
        .with_property("Population", population)
}

fn main() {
    let features = vec![
        parcel(0.0, "Residential", "120"),
        parcel(1.0, "Residential", "80"),
        parcel(2.0, "Commercial", "15"),
        parcel(3.0, "Residential", "n/a"),
    ];

    let params = DissolveParams::new(["LandUse"])
        .with_operator(OperatorPair::new("Population", "Integer", AggregateOp::Sum));

    let output = dissolve(&features, &params);

    println!("=== Dissolve by LandUse ===");
    for feature in &output.features {
        let area = feature.geometry.as_ref().map(|g| g.unsigned_area()).unwrap_or(0.0);
        println!(
            "{:<12} count={:<3} population={:<5} area={:.1}",
            feature.get_property("LandUse").unwrap_or(""),
            feature.get_property(COUNT_COLUMN).unwrap_or(""),
            feature.get_property("Population").unwrap_or(""),
            area
        );
    }
    println!("Invalid geometries: {}", output.invalid.len());
}
