use crate::processing::MapState;
use crate::types::{AreaEntity, PointEntity, ShapeKind};
use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use std::fs;
use std::path::Path;

/// Build the collaborator-facing GeoJSON: one Point feature per marker,
/// one LineString/Polygon feature per service area, display metadata in
/// the properties.
pub fn feature_collection(state: &MapState) -> FeatureCollection {
    let features = state
        .points
        .iter()
        .map(point_feature)
        .chain(state.areas.iter().map(area_feature))
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn point_feature(point: &PointEntity) -> Feature {
    let mut props = JsonObject::new();
    props.insert("kind".to_string(), JsonValue::from("location"));
    props.insert("name".to_string(), JsonValue::from(point.name.clone()));
    props.insert("address".to_string(), JsonValue::from(point.address.clone()));
    props.insert("category".to_string(), JsonValue::from(point.category.clone()));
    props.insert(
        "category_key".to_string(),
        JsonValue::from(point.category_key.clone()),
    );
    props.insert("icon".to_string(), JsonValue::from(point.icon.clone()));
    props.insert("color".to_string(), JsonValue::from(point.color.clone()));
    props.insert("images".to_string(), JsonValue::from(point.images.clone()));
    if let Some(link) = &point.maps_link {
        props.insert("maps_link".to_string(), JsonValue::from(link.clone()));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&point.position))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn area_feature(area: &AreaEntity) -> Feature {
    let mut props = JsonObject::new();
    props.insert("kind".to_string(), JsonValue::from("area"));
    props.insert("name".to_string(), JsonValue::from(area.name.clone()));
    props.insert("category".to_string(), JsonValue::from(area.category.clone()));
    props.insert(
        "category_key".to_string(),
        JsonValue::from(area.category_key.clone()),
    );
    props.insert("icon".to_string(), JsonValue::from(area.icon.clone()));
    props.insert(
        "color".to_string(),
        JsonValue::from(area.geometry.color.clone()),
    );
    props.insert(
        "shape".to_string(),
        JsonValue::from(match area.geometry.kind {
            ShapeKind::Line => "line",
            ShapeKind::Polygon => "polygon",
        }),
    );
    props.insert(
        "vertex_count".to_string(),
        JsonValue::from(area.geometry.vertex_count()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geojson::Value::from(&area.geometry.to_geo()))),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// Write the dataset as a GeoJSON file for the `generate` command.
pub fn write_snapshot(path: &Path, state: &MapState) -> Result<()> {
    let collection = feature_collection(state);
    let json = serde_json::to_string_pretty(&collection)
        .context("Failed to serialize feature collection")?;
    fs::write(path, json).with_context(|| format!("Failed to write snapshot: {:?}", path))?;
    println!(
        "Wrote {} features to {:?}",
        collection.features.len(),
        path
    );
    Ok(())
}
