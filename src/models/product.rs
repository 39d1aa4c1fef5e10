use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Represents a product as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Product {
    /// Unique identifier for the product (UUID v4), assigned at creation.
    pub id: Uuid,
    /// Display name. Must not be empty.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Unit price. Must not be negative.
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    /// Timestamp of when the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new `Product` with a fresh id and the current time as `created_at`.
    ///
    /// Fails with `AppError::Validation` if `name` is empty or `price` is negative.
    pub fn new(name: impl Into<String>, price: f64) -> Result<Self, AppError> {
        let product = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            created_at: Utc::now(),
        };
        product.validate()?;
        Ok(product)
    }

    /// Replaces every client-owned field with the values from `input`.
    ///
    /// `id` and `created_at` are server-owned and kept as they are.
    pub fn overwrite(self, input: ProductInput) -> Result<Self, AppError> {
        let product = Self {
            name: input.name,
            price: input.price,
            ..self
        };
        product.validate()?;
        Ok(product)
    }
}

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

/// Ordering applied to product listings, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses `"asc"` or `"desc"`; anything else falls back to ascending.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "desc" => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Raw query parameters of the product listing endpoint.
///
/// Values are kept as strings so that unparsable numbers fall back to their
/// defaults instead of failing the request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl ProductQuery {
    pub const DEFAULT_PAGE: u32 = 0;
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn page(&self) -> u32 {
        parse_or(self.page.as_deref(), Self::DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u32 {
        parse_or(self.limit.as_deref(), Self::DEFAULT_LIMIT)
    }

    pub fn sort(&self) -> SortDirection {
        self.sort
            .as_deref()
            .map(SortDirection::parse_or_default)
            .unwrap_or_default()
    }
}

fn parse_or(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
