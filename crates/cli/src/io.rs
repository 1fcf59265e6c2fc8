//! GeoJSON reading and writing for the batch host

use anyhow::{Context, Result};
use geodissolve_core::{Feature, FeatureCollection};
use geojson::{feature::Id, GeoJson, JsonObject, JsonValue};
use std::collections::HashMap;
use std::path::Path;

/// Read a GeoJSON FeatureCollection into string-attributed features.
pub fn read_features(path: &Path) -> Result<FeatureCollection> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let geojson: GeoJson = text.parse().context("Failed to parse GeoJSON")?;
    let collection = geojson::FeatureCollection::try_from(geojson)
        .context("Input must be a GeoJSON FeatureCollection")?;

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(i, f)| to_feature(f).with_context(|| format!("Feature #{}", i)))
        .collect()
}

fn to_feature(f: geojson::Feature) -> Result<Feature> {
    let geometry = match f.geometry {
        Some(g) => Some(geo_types::Geometry::<f64>::try_from(g).context("Unsupported geometry")?),
        None => None,
    };
    let id = f.id.map(|id| match id {
        Id::String(s) => s,
        Id::Number(n) => n.to_string(),
    });
    let properties = f
        .properties
        .map(|props| {
            props
                .into_iter()
                .filter_map(|(k, v)| property_text(v).map(|s| (k, s)))
                .collect()
        })
        .unwrap_or_default();

    Ok(Feature {
        geometry,
        properties,
        id,
    })
}

/// String encoding of a JSON property value; `null` means no value.
pub fn property_text(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Write features as a GeoJSON FeatureCollection with string properties.
pub fn write_features(features: &FeatureCollection, path: &Path) -> Result<()> {
    let out = geojson::FeatureCollection {
        bbox: None,
        features: features.iter().map(to_geojson).collect(),
        foreign_members: None,
    };
    std::fs::write(path, GeoJson::from(out).to_string())
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn to_geojson(f: &Feature) -> geojson::Feature {
    let properties: JsonObject = sorted(&f.properties)
        .into_iter()
        .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
        .collect();

    geojson::Feature {
        bbox: None,
        geometry: f
            .geometry
            .as_ref()
            .map(|g| geojson::Geometry::new(geojson::Value::from(g))),
        id: f.id.clone().map(Id::String),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn sorted(map: &HashMap<String, String>) -> Vec<(&String, &String)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort();
    entries
}
