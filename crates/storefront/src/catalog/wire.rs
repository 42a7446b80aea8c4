//! Catalog response parsing.
//!
//! Responses look like `{"status": true, "categories": [...]}` or
//! `{"status": true, "plants": [...]}`. A listing is only used when `status`
//! is truthy and the listing field is an array; anything else means there is
//! nothing to display.

use serde::Deserialize;
use serde_json::Value;

use plantshop_core::{Category, CategoryId, Plant, Price};

use super::Fetched;

/// Raw category record.
#[derive(Debug, Deserialize)]
struct CategoryRecord {
    id: Value,
    #[serde(default)]
    category_name: Option<String>,
}

/// Raw plant record.
///
/// Text fields may be missing or `null`; both render as empty.
#[derive(Debug, Deserialize)]
struct PlantRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Value,
}

/// Parse a categories response body.
pub(super) fn parse_categories(body: &Value) -> Fetched<Category> {
    let Some(items) = listing(body, "categories") else {
        return Fetched::Unavailable;
    };

    let categories = items
        .iter()
        .filter_map(|item| match CategoryRecord::deserialize(item) {
            Ok(record) => convert_category(record),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed category record");
                None
            }
        })
        .collect();

    Fetched::Loaded(categories)
}

/// Parse a plants response body.
pub(super) fn parse_plants(body: &Value) -> Fetched<Plant> {
    let Some(items) = listing(body, "plants") else {
        return Fetched::Unavailable;
    };

    let plants = items
        .iter()
        .filter_map(|item| match PlantRecord::deserialize(item) {
            Ok(record) => Some(convert_plant(record)),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed plant record");
                None
            }
        })
        .collect();

    Fetched::Loaded(plants)
}

/// The listing array, if the response is usable.
fn listing<'a>(body: &'a Value, field: &str) -> Option<&'a Vec<Value>> {
    let status = body.get("status").unwrap_or(&Value::Null);
    if !is_truthy(status) {
        return None;
    }
    body.get(field).and_then(Value::as_array)
}

/// Truthiness as the catalog's JSON producers intend it.
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn convert_category(record: CategoryRecord) -> Option<Category> {
    let id = match &record.id {
        Value::Number(n) => n.as_i64().and_then(|id| i32::try_from(id).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };

    let name = record.category_name.unwrap_or_default();
    let Some(id) = id else {
        tracing::warn!(id = %record.id, %name, "Skipping category with non-integer id");
        return None;
    };

    Some(Category {
        id: CategoryId::new(id),
        name,
    })
}

fn convert_plant(record: PlantRecord) -> Plant {
    Plant {
        name: record.name.unwrap_or_default(),
        image: record.image.unwrap_or_default(),
        description: record.description.filter(|d| !d.is_empty()),
        price: Price::from_json(&record.price),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_categories() {
        let body = json!({
            "status": true,
            "categories": [
                {"id": 1, "category_name": "Fruit Tree", "small_description": "ignored"},
                {"id": "2", "category_name": "Flowering Tree"}
            ]
        });

        let Fetched::Loaded(categories) = parse_categories(&body) else {
            panic!("expected categories");
        };
        assert_eq!(
            categories,
            vec![
                Category {
                    id: CategoryId::new(1),
                    name: "Fruit Tree".to_string()
                },
                Category {
                    id: CategoryId::new(2),
                    name: "Flowering Tree".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_categories_skips_bad_records() {
        let body = json!({
            "status": true,
            "categories": [
                "not a record",
                {"id": {"nested": true}, "category_name": "Odd"},
                {"id": 3, "category_name": "Shade Tree"},
                {"id": 4, "category_name": null}
            ]
        });

        let Fetched::Loaded(categories) = parse_categories(&body) else {
            panic!("expected categories");
        };
        assert_eq!(
            categories.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![CategoryId::new(3), CategoryId::new(4)]
        );
        assert_eq!(categories.get(1).map(|c| c.name.as_str()), Some(""));
    }

    #[test]
    fn test_parse_plants_tolerates_null_text_fields() {
        let body = json!({
            "status": true,
            "plants": [
                {"name": "Mango", "image": null, "description": null, "price": 100},
                {"name": null, "image": "n.png", "price": 50}
            ]
        });

        let Fetched::Loaded(plants) = parse_plants(&body) else {
            panic!("expected plants");
        };
        assert_eq!(plants.len(), 2);

        let mango = plants.first().cloned().unwrap_or_else(|| panic!("mango"));
        assert_eq!(mango.name, "Mango");
        assert_eq!(mango.image, "");
        assert_eq!(mango.description, None);
        assert_eq!(mango.price, Price::new(100));

        let unnamed = plants.get(1).cloned().unwrap_or_else(|| panic!("unnamed"));
        assert_eq!(unnamed.name, "");
        assert_eq!(unnamed.image, "n.png");
    }

    #[test]
    fn test_status_false_is_unavailable() {
        let body = json!({"status": false, "plants": [{"name": "Mango", "price": 100}]});
        assert!(matches!(parse_plants(&body), Fetched::Unavailable));
    }

    #[test]
    fn test_missing_status_is_unavailable() {
        let body = json!({"plants": []});
        assert!(matches!(parse_plants(&body), Fetched::Unavailable));
    }

    #[test]
    fn test_non_array_listing_is_unavailable() {
        let body = json!({"status": true, "plants": {"name": "Mango"}});
        assert!(matches!(parse_plants(&body), Fetched::Unavailable));

        let body = json!({"status": true, "data": []});
        assert!(matches!(parse_categories(&body), Fetched::Unavailable));
    }

    #[test]
    fn test_parse_plants_coerces_fields() {
        let body = json!({
            "status": "ok",
            "plants": [
                {"id": 1, "name": "Mango", "image": "https://i.example/m.png",
                 "description": "Sweet", "price": 100, "category": "Fruit Tree"},
                {"name": "Bamboo", "image": "b.png", "description": "", "price": "250"},
                {"name": "Banyan"}
            ]
        });

        let Fetched::Loaded(plants) = parse_plants(&body) else {
            panic!("expected plants");
        };
        assert_eq!(plants.len(), 3);

        let mango = plants.first().cloned().unwrap_or_else(|| panic!("mango"));
        assert_eq!(mango.price, Price::new(100));
        assert_eq!(mango.description.as_deref(), Some("Sweet"));

        let bamboo = plants.get(1).cloned().unwrap_or_else(|| panic!("bamboo"));
        assert_eq!(bamboo.price, Price::new(250));
        assert_eq!(bamboo.description, None);

        let banyan = plants.get(2).cloned().unwrap_or_else(|| panic!("banyan"));
        assert!(banyan.price.is_on_request());
        assert_eq!(banyan.image, "");
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(null)));
    }
}
