use crate::types::{NormalizedEntity, RawRow};
use geo::Point;

/// Ordered synonym lists per logical field. Datasets mix English and
/// Indonesian headers in either casing; the first key present in the row
/// wins, regardless of what the cell holds. Emptiness checks happen per
/// field below.
const NAME_KEYS: &[&str] = &["Name", "name", "Nama", "nama"];
const ADDRESS_KEYS: &[&str] = &["Address", "address", "Alamat", "alamat"];
const CATEGORY_KEYS: &[&str] = &["Jenis", "type", "jenis", "kategori", "Kategori"];
const IMAGE_KEYS: &[&str] = &["gambar", "images", "Gambar", "foto", "Foto"];
const MAPS_KEYS: &[&str] = &["GoogleMaps", "googlemaps", "Google Maps", "maps"];
const LAT_KEYS: &[&str] = &["latitude", "Latitude", "Lat", "lat"];
const LNG_KEYS: &[&str] = &["Longitude", "longitude", "Lng", "lng", "Long"];
const AREA_KEYS: &[&str] = &["area", "Area", "polygon", "Polygon"];
const COLOR_KEYS: &[&str] = &["Warna", "warna", "Color", "color"];

pub const ADDRESS_PLACEHOLDER: &str = "Alamat tidak tersedia";
pub const DEFAULT_CATEGORY: &str = "default";

/// Turn one raw spreadsheet row into a canonical record. Total function:
/// every field has a fallback, so any row shape produces an entity.
/// `index` is the 0-based row position, used for the synthetic name.
pub fn normalize(row: &RawRow, index: usize) -> NormalizedEntity {
    let name = non_blank(first_present(row, NAME_KEYS))
        .map(str::to_string)
        .unwrap_or_else(|| format!("UMKM {}", index + 1));

    let address = non_blank(first_present(row, ADDRESS_KEYS))
        .unwrap_or(ADDRESS_PLACEHOLDER)
        .to_string();

    let category = non_blank(first_present(row, CATEGORY_KEYS))
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    let images = first_present(row, IMAGE_KEYS)
        .map(split_images)
        .unwrap_or_default();

    let maps_link = non_blank(first_present(row, MAPS_KEYS)).map(|s| s.trim().to_string());

    let area_raw = non_blank(first_present(row, AREA_KEYS)).map(|s| s.trim().to_string());

    let color_override = non_blank(first_present(row, COLOR_KEYS)).map(str::to_string);

    NormalizedEntity {
        name,
        address,
        category,
        images,
        maps_link,
        coordinate: parse_coordinate(row),
        area_raw,
        color_override,
    }
}

fn first_present<'a>(row: &'a RawRow, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| row.get(*key).map(String::as_str))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn split_images(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(str::to_string)
        .collect()
}

/// Both axes must parse as numbers and neither may be exactly zero. A zero
/// cell is the sheet's "no location data" sentinel, which makes legitimate
/// equatorial and prime-meridian coordinates indistinguishable from empty.
/// Known limitation.
fn parse_coordinate(row: &RawRow) -> Option<Point<f64>> {
    let lat: f64 = first_present(row, LAT_KEYS)?.trim().parse().ok()?;
    let lng: f64 = first_present(row, LNG_KEYS)?.trim().parse().ok()?;
    if lat == 0.0 || lng == 0.0 {
        return None;
    }
    Some(Point::new(lng, lat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RawRow;

    fn row(fields: &[(&str, &str)]) -> RawRow {
        fields
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_row() {
        let entity = normalize(
            &row(&[
                ("Nama", "Warung Bu Siti"),
                ("Alamat", "Jl. Ahmad Yani 12"),
                ("Jenis", "Makanan"),
                ("latitude", "-2.2088"),
                ("Longitude", "113.9213"),
                ("gambar", "a.jpg, b.jpg"),
                ("GoogleMaps", "https://maps.example/x"),
                ("area", "-2.0,113.0|-2.1,113.1"),
                ("Warna", "merah"),
            ]),
            0,
        );
        assert_eq!(entity.name, "Warung Bu Siti");
        assert_eq!(entity.address, "Jl. Ahmad Yani 12");
        assert_eq!(entity.category, "Makanan");
        assert_eq!(entity.category_key(), "makanan");
        assert_eq!(entity.images, vec!["a.jpg", "b.jpg"]);
        assert_eq!(entity.maps_link.as_deref(), Some("https://maps.example/x"));
        let point = entity.coordinate.unwrap();
        assert_eq!(point.y(), -2.2088);
        assert_eq!(point.x(), 113.9213);
        assert_eq!(entity.area_raw.as_deref(), Some("-2.0,113.0|-2.1,113.1"));
        assert_eq!(entity.color_override.as_deref(), Some("merah"));
    }

    #[test]
    fn test_empty_row_never_fails() {
        let entity = normalize(&RawRow::new(), 4);
        assert_eq!(entity.name, "UMKM 5");
        assert_eq!(entity.address, ADDRESS_PLACEHOLDER);
        assert_eq!(entity.category, DEFAULT_CATEGORY);
        assert!(entity.images.is_empty());
        assert!(entity.maps_link.is_none());
        assert!(entity.coordinate.is_none());
        assert!(entity.area_raw.is_none());
        assert!(entity.color_override.is_none());
    }

    #[test]
    fn test_synonym_priority() {
        // "Name" outranks "nama" when both are present.
        let entity = normalize(&row(&[("nama", "lower"), ("Name", "upper")]), 0);
        assert_eq!(entity.name, "upper");
    }

    #[test]
    fn test_blank_name_gets_synthetic_label() {
        let entity = normalize(&row(&[("Name", "   ")]), 2);
        assert_eq!(entity.name, "UMKM 3");
    }

    #[test]
    fn test_zero_zero_coordinate_is_absent() {
        let entity = normalize(&row(&[("latitude", "0"), ("Longitude", "0")]), 0);
        assert!(entity.coordinate.is_none());
    }

    #[test]
    fn test_single_zero_axis_is_absent() {
        let entity = normalize(&row(&[("latitude", "0"), ("Longitude", "113.9")]), 0);
        assert!(entity.coordinate.is_none());
    }

    #[test]
    fn test_non_numeric_coordinate_is_absent() {
        let entity = normalize(&row(&[("latitude", "abc"), ("Longitude", "113.9")]), 0);
        assert!(entity.coordinate.is_none());
    }

    #[test]
    fn test_missing_longitude_is_absent() {
        let entity = normalize(&row(&[("latitude", "-2.2")]), 0);
        assert!(entity.coordinate.is_none());
    }

    #[test]
    fn test_image_list_drops_empty_entries() {
        let entity = normalize(&row(&[("images", "a.jpg, b.jpg,,c.jpg")]), 0);
        assert_eq!(entity.images, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_blank_area_and_color_become_none() {
        let entity = normalize(&row(&[("area", "   "), ("color", "")]), 0);
        assert!(entity.area_raw.is_none());
        assert!(entity.color_override.is_none());
    }

    #[test]
    fn test_category_display_casing_preserved() {
        let entity = normalize(&row(&[("kategori", "KeRaJinan")]), 0);
        assert_eq!(entity.category, "KeRaJinan");
        assert_eq!(entity.category_key(), "kerajinan");
    }
}
