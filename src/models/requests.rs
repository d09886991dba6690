//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP query strings and bodies, and
//! validates them into domain types. Validation reports every violated
//! field, never just the first.

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{ListQuery, DEFAULT_PAGE_SIZE};
use crate::error::FieldError;
use crate::models::item::{NewItem, MAX_CATEGORY_LENGTH, MAX_NAME_LENGTH};

/// Query string for GET /items
///
/// Numbers arrive as raw strings so malformed values become field errors
/// instead of extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Substring to match against name and category
    #[serde(default, alias = "q")]
    pub search: Option<String>,
    /// 1-based page number
    #[serde(default)]
    pub page: Option<String>,
    /// Items per page
    #[serde(default, rename = "pageSize", alias = "limit")]
    pub page_size: Option<String>,
}

impl ListParams {
    /// Validates the parameters into a catalog query.
    pub fn validate(self) -> Result<ListQuery, Vec<FieldError>> {
        let mut errors = Vec::new();

        let page = parse_positive(self.page.as_deref(), "page", 1, &mut errors);
        let page_size = parse_positive(
            self.page_size.as_deref(),
            "pageSize",
            DEFAULT_PAGE_SIZE,
            &mut errors,
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ListQuery {
            search: self.search.filter(|s| !s.trim().is_empty()),
            page,
            page_size,
        })
    }
}

fn parse_positive(
    raw: Option<&str>,
    field: &str,
    default: usize,
    errors: &mut Vec<FieldError>,
) -> usize {
    let raw = match raw.map(str::trim) {
        None | Some("") => return default,
        Some(raw) => raw,
    };
    match raw.parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => {
            errors.push(FieldError::new(
                field,
                format!("{} must be a positive integer", field),
            ));
            default
        }
    }
}

/// Request body for POST /items
///
/// Fields are kept as raw JSON so that type mismatches on several fields
/// can all be reported at once. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl CreateItemRequest {
    /// Validates the body into a `NewItem`.
    pub fn validate(self) -> Result<NewItem, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match self.name {
            None => {
                errors.push(FieldError::new("name", "name is required"));
                None
            }
            Some(Value::String(name)) if name.is_empty() => {
                errors.push(FieldError::new("name", "name cannot be empty"));
                None
            }
            Some(Value::String(name)) if name.chars().count() > MAX_NAME_LENGTH => {
                errors.push(FieldError::new(
                    "name",
                    format!("name must be {} characters or less", MAX_NAME_LENGTH),
                ));
                None
            }
            Some(Value::String(name)) => Some(name),
            Some(_) => {
                errors.push(FieldError::new("name", "name must be a string"));
                None
            }
        };

        let category = match self.category {
            None => None,
            Some(Value::String(category)) if category.chars().count() > MAX_CATEGORY_LENGTH => {
                errors.push(FieldError::new(
                    "category",
                    format!("category must be {} characters or less", MAX_CATEGORY_LENGTH),
                ));
                None
            }
            Some(Value::String(category)) => Some(category),
            Some(_) => {
                errors.push(FieldError::new("category", "category must be a string"));
                None
            }
        };

        let price = match self.price {
            None => {
                errors.push(FieldError::new("price", "price is required"));
                None
            }
            Some(raw) => match numeric(&raw) {
                Some(price) if price > 0.0 => Some(price),
                Some(_) => {
                    errors.push(FieldError::new("price", "price must be positive"));
                    None
                }
                None => {
                    errors.push(FieldError::new("price", "price must be a number"));
                    None
                }
            },
        };

        match (name, price) {
            (Some(name), Some(price)) if errors.is_empty() => Ok(NewItem {
                name,
                category,
                price,
            }),
            _ => Err(errors),
        }
    }
}

/// Reads a JSON number, or a string holding one, as a finite float.
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
