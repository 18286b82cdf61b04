//! Catalog document: the list of published datasets and their categories,
//! fetched once from `data/catalog.json`.

use serde::Deserialize;

/// Sentinel category id meaning "show everything".
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub datasets: Vec<CatalogEntry>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// One catalog card.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub file_path: String,
    #[serde(default)]
    pub temporal_coverage: String,
    #[serde(default)]
    pub spatial_coverage: String,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub has_filters: bool,
    #[serde(default)]
    pub records: Option<u64>,
    #[serde(default)]
    pub chart_types: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Catalog {
    pub fn find(&self, id: &str) -> Option<&CatalogEntry> {
        self.datasets.iter().find(|d| d.id == id)
    }

    /// Entries in a category, with `"all"` selecting everything.
    pub fn entries_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogEntry> {
        self.datasets
            .iter()
            .filter(move |d| category == ALL_CATEGORIES || d.category == category)
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "categories": [
            {"id": "energy", "name": "Energy", "icon": "zap"},
            {"id": "economy", "name": "Economy", "icon": "trending-up"}
        ],
        "datasets": [
            {
                "id": "solar-capacity",
                "title": "Installed solar capacity",
                "category": "energy",
                "file_path": "/data/solar-capacity.json",
                "temporal_coverage": "2000-2023",
                "featured": true,
                "chart_types": ["line"]
            },
            {
                "id": "gdp-per-capita",
                "title": "GDP per capita",
                "category": "economy",
                "file_path": "data/gdp-per-capita.json",
                "has_filters": true
            }
        ]
    }"#;

    #[test]
    fn parses_and_finds_by_id() {
        let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(catalog.datasets.len(), 2);
        let entry = catalog.find("solar-capacity").unwrap();
        assert!(entry.featured);
        assert_eq!(entry.file_path, "/data/solar-capacity.json");
        assert!(catalog.find("nope").is_none());
    }

    #[test]
    fn category_filtering_with_all_sentinel() {
        let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(catalog.entries_in(ALL_CATEGORIES).count(), 2);
        let energy: Vec<_> = catalog.entries_in("energy").collect();
        assert_eq!(energy.len(), 1);
        assert_eq!(energy[0].id, "solar-capacity");
        assert_eq!(catalog.entries_in("health").count(), 0);
    }

    #[test]
    fn category_name_lookup() {
        let catalog: Catalog = serde_json::from_str(CATALOG).unwrap();
        assert_eq!(catalog.category_name("energy"), Some("Energy"));
        assert_eq!(catalog.category_name("missing"), None);
    }
}
