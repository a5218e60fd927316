//! Category models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub slug: String,
    pub status: bool,
    pub priority: i32,
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub slug: String,
    pub status: bool,
    pub priority: i32,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_with_subcategories() {
        let category: Category = serde_json::from_value(json!({
            "id": "c1",
            "name": "Trucks",
            "description": "Heavy duty",
            "image_url": "https://cdn/c1.png",
            "slug": "trucks",
            "status": true,
            "priority": 1,
            "subcategories": [{
                "id": "s1",
                "name": "Tippers",
                "description": "",
                "image_url": "",
                "slug": "tippers",
                "status": true,
                "priority": 2,
                "category_id": "c1"
            }]
        }))
        .unwrap();

        assert_eq!(category.subcategories.len(), 1);
        assert_eq!(category.subcategories[0].category_id, "c1");
    }

    #[test]
    fn test_category_without_subcategories() {
        let category: Category = serde_json::from_value(json!({
            "id": "c2",
            "name": "Vans",
            "slug": "vans",
            "status": false,
            "priority": 3
        }))
        .unwrap();

        assert!(category.subcategories.is_empty());
    }
}
