use geo::{Coord, Geometry, LineString, Point, Polygon};
use std::collections::HashMap;

/// One raw spreadsheet row: header name -> cell value.
/// Header names are inconsistent across datasets (language-mixed, case-mixed
/// synonyms for the same concept); duplicate headers overwrite, last one wins.
pub type RawRow = HashMap<String, String>;

/// Canonical record produced from a raw row. Every field has a defined
/// fallback, so building one never fails.
#[derive(Debug, Clone)]
pub struct NormalizedEntity {
    pub name: String,
    pub address: String,
    /// Display casing as found in the row; use `category_key()` for lookups.
    pub category: String,
    pub images: Vec<String>,
    pub maps_link: Option<String>,
    pub coordinate: Option<Point<f64>>,
    /// Raw, unparsed area field (trimmed, non-empty only).
    pub area_raw: Option<String>,
    /// Raw colour token before resolution.
    pub color_override: Option<String>,
}

impl NormalizedEntity {
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Polygon,
}

/// A parsed service-area outline: 2 vertices render as a line, 3 or more as
/// a polygon. Built once per row during ingestion and rebuilt in full on
/// every refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaGeometry {
    /// Vertices in row order, x = longitude, y = latitude.
    pub points: Vec<Coord<f64>>,
    pub kind: ShapeKind,
    /// Resolved display colour, `#rrggbb` or a 3/6-digit literal passed through.
    pub color: String,
}

impl AreaGeometry {
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Convert to a geo geometry for GeoJSON output. Polygon rings are
    /// closed here; the source format never repeats the first vertex.
    pub fn to_geo(&self) -> Geometry<f64> {
        match self.kind {
            ShapeKind::Line => Geometry::LineString(LineString::from(self.points.clone())),
            ShapeKind::Polygon => {
                let mut ring = self.points.clone();
                if ring.first() != ring.last() {
                    if let Some(first) = ring.first().copied() {
                        ring.push(first);
                    }
                }
                Geometry::Polygon(Polygon::new(LineString::from(ring), vec![]))
            }
        }
    }
}

/// A point marker handed to the rendering collaborator.
#[derive(Debug, Clone)]
pub struct PointEntity {
    pub name: String,
    pub address: String,
    pub category: String,
    pub category_key: String,
    pub images: Vec<String>,
    pub maps_link: Option<String>,
    pub position: Point<f64>,
    pub icon: String,
    pub color: String,
}

/// A service-area shape handed to the rendering collaborator.
#[derive(Debug, Clone)]
pub struct AreaEntity {
    pub name: String,
    pub category: String,
    pub category_key: String,
    pub icon: String,
    pub geometry: AreaGeometry,
}
