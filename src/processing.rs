use crate::config::AppConfig;
use crate::geometry;
use crate::normalize;
use crate::types::{AreaEntity, PointEntity, RawRow};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Default, Clone, Serialize)]
pub struct DatasetStats {
    /// Every parsed row, including ones that produced no entity.
    pub total_rows: usize,
    pub valid_locations: usize,
    /// Categories owning at least one valid point or area.
    pub distinct_categories: usize,
    pub valid_areas: usize,
}

/// Legend/filter entry for one category.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CategoryBucket {
    /// Display casing as first seen in the data.
    pub name: String,
    pub locations: usize,
    pub areas: usize,
}

/// All derived map entities for one ingested dataset. Owned by the
/// top-level controller and handed to rendering calls by reference;
/// every refresh clears it before repopulating.
#[derive(Debug, Default)]
pub struct MapState {
    pub points: Vec<PointEntity>,
    pub areas: Vec<AreaEntity>,
    pub categories: BTreeMap<String, CategoryBucket>,
    pub stats: DatasetStats,
}

impl MapState {
    pub fn clear(&mut self) {
        self.points.clear();
        self.areas.clear();
        self.categories.clear();
        self.stats = DatasetStats::default();
    }
}

/// Rebuild the map state from a fresh batch of raw rows. Per-row problems
/// (missing coordinate, bad geometry) never abort the batch.
pub fn rebuild(state: &mut MapState, config: &AppConfig, rows: &[RawRow]) {
    state.clear();
    state.stats.total_rows = rows.len();

    for (index, row) in rows.iter().enumerate() {
        let entity = normalize::normalize(row, index);
        let key = entity.category_key();

        // Every seen category gets a bucket so the filter panel can list it,
        // even when the row contributes no valid entity.
        state
            .categories
            .entry(key.clone())
            .or_insert_with(|| CategoryBucket {
                name: entity.category.clone(),
                ..CategoryBucket::default()
            });

        let style = config.category_style(&key);

        if let Some(position) = entity.coordinate {
            state.points.push(PointEntity {
                name: entity.name.clone(),
                address: entity.address.clone(),
                category: entity.category.clone(),
                category_key: key.clone(),
                images: entity.images.clone(),
                maps_link: entity.maps_link.clone(),
                position,
                icon: style.icon.clone(),
                color: style.color.clone(),
            });
            state.stats.valid_locations += 1;
            if let Some(bucket) = state.categories.get_mut(&key) {
                bucket.locations += 1;
            }
        }

        if let Some(area_raw) = &entity.area_raw {
            match geometry::parse_area(
                area_raw,
                entity.color_override.as_deref(),
                &config.map.default_area_color,
            ) {
                Ok(area) => {
                    state.areas.push(AreaEntity {
                        name: entity.name.clone(),
                        category: entity.category.clone(),
                        category_key: key.clone(),
                        icon: style.icon,
                        geometry: area,
                    });
                    state.stats.valid_areas += 1;
                    if let Some(bucket) = state.categories.get_mut(&key) {
                        bucket.areas += 1;
                    }
                }
                Err(err) => {
                    // The row's marker, if any, is unaffected.
                    warn!("Dropping area for \"{}\": {}", entity.name, err);
                }
            }
        }
    }

    state.stats.distinct_categories = state
        .categories
        .values()
        .filter(|bucket| bucket.locations > 0 || bucket.areas > 0)
        .count();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_rows;
    use crate::types::ShapeKind;

    fn test_config() -> AppConfig {
        toml::from_str(
            r#"
            [source]
            csv_url = "https://example.com/pub?output=csv"
            "#,
        )
        .unwrap()
    }

    fn rebuild_from_csv(csv: &str) -> MapState {
        let rows = parse_rows(csv.as_bytes()).unwrap();
        let mut state = MapState::default();
        rebuild(&mut state, &test_config(), &rows);
        state
    }

    #[test]
    fn test_points_and_areas_from_mixed_rows() {
        let state = rebuild_from_csv(
            "Nama,Jenis,latitude,Longitude,area\n\
             Warung A,Makanan,-2.1,113.1,\n\
             Kebun B,Pertanian,,,\"-2.0,113.0|-2.1,113.1|-2.2,113.2\"\n\
             Toko C,Elektronik,-2.3,113.3,\"-2.0,113.0|-2.1,113.1\"\n",
        );
        assert_eq!(state.stats.total_rows, 3);
        assert_eq!(state.stats.valid_locations, 2);
        assert_eq!(state.stats.valid_areas, 2);
        assert_eq!(state.stats.distinct_categories, 3);
        assert_eq!(state.points.len(), 2);
        assert_eq!(state.areas.len(), 2);
        assert_eq!(state.areas[0].geometry.kind, ShapeKind::Polygon);
        assert_eq!(state.areas[1].geometry.kind, ShapeKind::Line);
    }

    #[test]
    fn test_bad_geometry_keeps_the_marker() {
        let state = rebuild_from_csv(
            "Nama,latitude,Longitude,area\n\
             Warung A,-2.1,113.1,\"abc,113.0|-2.1,113.1\"\n",
        );
        assert_eq!(state.points.len(), 1);
        assert_eq!(state.areas.len(), 0);
        assert_eq!(state.stats.valid_locations, 1);
        assert_eq!(state.stats.valid_areas, 0);
    }

    #[test]
    fn test_row_with_neither_still_counts_toward_total() {
        let state = rebuild_from_csv(
            "Nama,Jenis,latitude,Longitude\n\
             Warung A,Makanan,0,0\n\
             Warung B,Makanan,-2.1,113.1\n",
        );
        assert_eq!(state.stats.total_rows, 2);
        assert_eq!(state.stats.valid_locations, 1);
        // The 0,0 row's category still has a bucket, and the category is
        // distinct because Warung B made it valid.
        assert_eq!(state.stats.distinct_categories, 1);
    }

    #[test]
    fn test_invalid_only_category_is_listed_but_not_distinct() {
        let state = rebuild_from_csv(
            "Nama,Jenis,latitude,Longitude\n\
             Warung A,Makanan,0,0\n\
             Toko B,Elektronik,-2.1,113.1\n",
        );
        assert_eq!(state.categories.len(), 2);
        assert!(state.categories.contains_key("makanan"));
        assert_eq!(state.stats.distinct_categories, 1);
    }

    #[test]
    fn test_first_seen_display_casing_wins() {
        let state = rebuild_from_csv(
            "Nama,Jenis,latitude,Longitude\n\
             A,MaKaNan,-2.1,113.1\n\
             B,makanan,-2.2,113.2\n",
        );
        assert_eq!(state.categories["makanan"].name, "MaKaNan");
        assert_eq!(state.categories["makanan"].locations, 2);
    }

    #[test]
    fn test_registry_styles_points() {
        let state = rebuild_from_csv(
            "Nama,Jenis,latitude,Longitude\n\
             A,Makanan,-2.1,113.1\n\
             B,Angkringan,-2.2,113.2\n",
        );
        assert_eq!(state.points[0].icon, "fa-utensils");
        assert_eq!(state.points[0].color, "#dc2626");
        // Unknown category takes the default style.
        assert_eq!(state.points[1].icon, "fa-store");
        assert_eq!(state.points[1].color, "#6b7280");
    }

    #[test]
    fn test_rebuild_clears_previous_state() {
        let rows = parse_rows(
            "Nama,latitude,Longitude\nWarung A,-2.1,113.1\n".as_bytes(),
        )
        .unwrap();
        let config = test_config();
        let mut state = MapState::default();
        rebuild(&mut state, &config, &rows);
        rebuild(&mut state, &config, &rows);
        assert_eq!(state.points.len(), 1);
        assert_eq!(state.stats.total_rows, 1);
    }
}
