use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub map: MapDisplayConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Category registry: lowercase category key -> display descriptor.
    /// A closed set; unknown categories fall back to the `default` entry.
    #[serde(default = "default_categories")]
    pub categories: HashMap<String, CategoryStyle>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    /// Published-spreadsheet CSV export URL.
    pub csv_url: String,
}

/// Display toggles that used to be spread across three near-duplicate
/// script variants. The core only forwards these to the front-end.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MapDisplayConfig {
    #[serde(default = "default_show_filters")]
    pub show_filters: bool,
    #[serde(default = "default_icon_size")]
    pub icon_size: u32,
    #[serde(default = "default_fill_opacity")]
    pub polygon_fill_opacity: f64,
    #[serde(default = "default_line_weight")]
    pub line_weight: u32,
    #[serde(default = "default_area_color")]
    pub default_area_color: String,
}

impl Default for MapDisplayConfig {
    fn default() -> Self {
        Self {
            show_filters: default_show_filters(),
            icon_size: default_icon_size(),
            polygon_fill_opacity: default_fill_opacity(),
            line_weight: default_line_weight(),
            default_area_color: default_area_color(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CategoryStyle {
    pub icon: String,
    pub color: String,
}

fn default_show_filters() -> bool {
    true
}

fn default_icon_size() -> u32 {
    32
}

fn default_fill_opacity() -> f64 {
    0.3
}

fn default_line_weight() -> u32 {
    4
}

fn default_area_color() -> String {
    "#FF6B6B".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(".")
}

pub fn default_categories() -> HashMap<String, CategoryStyle> {
    let entries = [
        ("makanan", "fa-utensils", "#dc2626"),
        ("minuman", "fa-coffee", "#7c3aed"),
        ("kerajinan", "fa-shopping-bag", "#059669"),
        ("tekstil", "fa-tshirt", "#0891b2"),
        ("furniture", "fa-chair", "#ea580c"),
        ("elektronik", "fa-mobile-alt", "#4338ca"),
        ("otomotif", "fa-car", "#374151"),
        ("jasa", "fa-hands-helping", "#9333ea"),
        ("pertanian", "fa-seedling", "#16a34a"),
        ("perikanan", "fa-fish", "#0284c7"),
        ("kosmetik", "fa-palette", "#ec4899"),
        ("farmasi", "fa-pills", "#dc2626"),
        ("default", "fa-store", "#6b7280"),
    ];
    entries
        .into_iter()
        .map(|(key, icon, color)| {
            (
                key.to_string(),
                CategoryStyle {
                    icon: icon.to_string(),
                    color: color.to_string(),
                },
            )
        })
        .collect()
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Style for a lowercase category key, falling back to the `default`
    /// registry entry.
    pub fn category_style(&self, key: &str) -> CategoryStyle {
        self.categories
            .get(key)
            .or_else(|| self.categories.get("default"))
            .cloned()
            .unwrap_or_else(|| CategoryStyle {
                icon: "fa-store".to_string(),
                color: "#6b7280".to_string(),
            })
    }
}
