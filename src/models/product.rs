use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use schemars::{
    JsonSchema,
    r#gen::SchemaGenerator,
    schema::{InstanceType, Schema, SchemaObject},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A creation payload that has already passed the presence checks.
#[derive(Debug, Clone, PartialEq, JsonSchema)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub weight: f64,
}

impl NewProduct {
    /// Coerces validated payload values into the column types. Numbers are
    /// accepted as names and numeric strings as prices or weights; anything
    /// else is rejected the way the store would reject it.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            name: text_field(payload, "name")?,
            price: number_field(payload, "price")?,
            weight: number_field(payload, "weight")?,
        })
    }
}

fn text_field(payload: &Map<String, Value>, key: &str) -> Result<String> {
    match payload.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(other) => Err(AppError::InvalidPayload(format!(
            "\"{}\" cannot be stored as text: {}",
            key, other
        ))),
        None => Err(AppError::InvalidPayload(format!("\"{}\" is missing", key))),
    }
}

fn number_field(payload: &Map<String, Value>, key: &str) -> Result<f64> {
    let parsed = match payload.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        AppError::InvalidPayload(format!(
            "\"{}\" cannot be stored as a number: {}",
            key,
            payload.get(key).unwrap_or(&Value::Null)
        ))
    })
}

/// Raw creation body. Kept untyped so validation can see every field, but
/// documented with the shape of [`NewProduct`].
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ProductPayload(pub Value);

impl JsonSchema for ProductPayload {
    fn schema_name() -> String {
        NewProduct::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        NewProduct::json_schema(generator)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProductPath {
    pub id: String,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ProductListQuery {
    /// Field to sort ascending by. Unknown fields leave the order unchanged.
    #[serde(default)]
    #[schemars(schema_with = "sort_key_schema")]
    pub sort: Option<String>,
}

fn sort_key_schema(_: &mut SchemaGenerator) -> Schema {
    SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        enum_values: Some(SortField::ALL.iter().map(|f| f.key().into()).collect()),
        ..Default::default()
    }
    .into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Price,
    Weight,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        Self::Id,
        Self::Name,
        Self::Price,
        Self::Weight,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Query-string key, matching the JSON field name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::Weight => "weight",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Maps a query-string key to a sortable field. Unknown keys yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            Self::Weight => a.weight.partial_cmp(&b.weight).unwrap_or(Ordering::Equal),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

/// Reorders `products` ascending by the field named in `sort`. A missing or
/// unrecognised key leaves the storage order untouched.
pub fn sort_products(products: &mut [Product], sort: Option<&str>) {
    if let Some(field) = sort.and_then(SortField::parse) {
        products.sort_by(|a, b| field.compare(a, b));
    }
}
