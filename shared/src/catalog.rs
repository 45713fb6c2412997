use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One slice of the wheel. Angular position comes from its index in the
/// catalog, never from the slice itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Slice {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub color: String,
    pub text_color: String,
    pub icon: String,
    pub rating: f32,
}

impl Slice {
    fn new(
        id: &str,
        name: &str,
        short_name: Option<&str>,
        color: &str,
        text_color: &str,
        icon: &str,
        rating: f32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            short_name: short_name.map(str::to_string),
            color: color.to_string(),
            text_color: text_color.to_string(),
            icon: icon.to_string(),
            rating,
        }
    }

    /// Label drawn on the wheel face.
    pub fn label(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// The fixed, ordered catalog. Order is part of the wheel geometry: do not sort.
pub static CATALOG: Lazy<Vec<Slice>> = Lazy::new(|| {
    vec![
        Slice::new("1", "佘山国家森林公园", Some("佘山"), "#FF6B6B", "#FFFFFF", "Mountain", 4.5),
        Slice::new("2", "东平国家森林公园", Some("东平森林"), "#4ECDC4", "#FFFFFF", "Trees", 4.0),
        Slice::new("3", "滨江森林公园", Some("滨江森林"), "#45B7D1", "#FFFFFF", "Waves", 4.2),
        Slice::new("4", "辰山植物园", None, "#96CEB4", "#FFFFFF", "Flower", 4.8),
        Slice::new("5", "共青森林公园", Some("共青森林"), "#FFEEAD", "#333333", "Tent", 4.3),
        Slice::new("6", "海湾国家森林公园", Some("海湾森林"), "#D4A5A5", "#FFFFFF", "Bird", 3.8),
        Slice::new("7", "顾村公园", None, "#9B59B6", "#FFFFFF", "Cherry", 4.1),
        Slice::new("8", "世纪公园", None, "#3498DB", "#FFFFFF", "Sun", 4.6),
        Slice::new("10", "世博文化公园-双子山", Some("双子山"), "#E67E22", "#FFFFFF", "Mountain", 4.7),
        Slice::new("9", "工作累了，周末哪也不想去", Some("宅家躺平"), "#64748b", "#FFFFFF", "Coffee", 5.0),
    ]
});

/// Markers identifying the "stay home" slice. Matched by substring.
pub const STAY_HOME_MARKERS: [&str; 2] = ["周末哪也不想去", "宅家"];

pub fn is_stay_home(name: &str) -> bool {
    STAY_HOME_MARKERS.iter().any(|marker| name.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), CATALOG.len());
        assert_eq!(CATALOG.len(), 10);
    }

    #[test]
    fn test_label_prefers_short_name() {
        assert_eq!(CATALOG[0].label(), "佘山");
        assert_eq!(CATALOG[3].label(), "辰山植物园");
    }

    #[test]
    fn test_stay_home_detection() {
        assert!(is_stay_home("工作累了，周末哪也不想去"));
        assert!(is_stay_home("宅家躺平"));
        assert!(!is_stay_home("世纪公园"));
    }
}
