use serde_json::{Map, Value};

use crate::models::{ValidationDetail, ValidationErrors};

pub const REQUIRED_PRODUCT_FIELDS: [&str; 3] = ["name", "price", "weight"];

/// Checks that every required field is present and not `null`. Only presence
/// is enforced, and all violations are collected before returning.
pub fn validate_product(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    let object = payload.as_object();

    let data: Vec<ValidationDetail> = REQUIRED_PRODUCT_FIELDS
        .iter()
        .filter(|key| !matches!(object.and_then(|o| o.get(**key)), Some(v) if !v.is_null()))
        .map(|key| ValidationDetail::required(key))
        .collect();

    match object {
        Some(object) if data.is_empty() => Ok(object),
        _ => Err(ValidationErrors { data }),
    }
}
