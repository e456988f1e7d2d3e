use crate::color;
use crate::types::{AreaGeometry, ShapeKind};
use geo::Coord;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid coordinate format: \"{0}\" - needs lat,lng")]
    MalformedVertex(String),
    #[error("coordinates out of valid range: lat={lat}, lng={lng}")]
    OutOfRange { lat: f64, lng: f64 },
    #[error("needs at least 2 coordinates for a line/polygon, got {0}")]
    InsufficientVertices(usize),
}

/// Parse a pipe-delimited `lat,lng` vertex list into a line or polygon.
///
/// Fail-fast: the first bad vertex aborts the whole geometry, no partial
/// shapes. The count check runs after parsing, so a single well-formed
/// vertex is `InsufficientVertices`, not a parse error. The display colour
/// is resolved from `color_token` and attached.
pub fn parse_area(
    raw: &str,
    color_token: Option<&str>,
    default_color: &str,
) -> Result<AreaGeometry, GeometryError> {
    let mut points: Vec<Coord<f64>> = Vec::new();

    for token in raw.split('|') {
        let cleaned = token.split_whitespace().collect::<Vec<_>>().join(" ");
        let parts: Vec<&str> = cleaned.split(',').map(str::trim).collect();

        if parts.len() < 2 {
            return Err(GeometryError::MalformedVertex(cleaned));
        }

        let lat: f64 = parts[0]
            .parse()
            .map_err(|_| GeometryError::MalformedVertex(cleaned.clone()))?;
        let lng: f64 = parts[1]
            .parse()
            .map_err(|_| GeometryError::MalformedVertex(cleaned.clone()))?;

        if lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(GeometryError::OutOfRange { lat, lng });
        }

        points.push(Coord { x: lng, y: lat });
    }

    if points.len() < 2 {
        return Err(GeometryError::InsufficientVertices(points.len()));
    }

    let kind = if points.len() == 2 {
        ShapeKind::Line
    } else {
        ShapeKind::Polygon
    };

    Ok(AreaGeometry {
        points,
        kind,
        color: color::resolve_color(color_token, default_color),
    })
}
