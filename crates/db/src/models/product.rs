//! Product models and DTOs.
//!
//! On the wire the description travels as `deskripsi`; incoming payloads
//! may also use `description`. Prices are fixed-point with two decimal
//! digits and serialize as strings (`"1.50"`).

use katalog_core::error::CoreError;
use katalog_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

/// Number of fractional digits every stored price carries.
pub const PRICE_SCALE: u32 = 2;

/// Largest magnitude a `NUMERIC(16, 2)` column accepts.
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999_999_999, PRICE_SCALE)
}

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "deskripsi")]
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Create payload as decoded from JSON.
///
/// Every field is optional at decode time so a missing field surfaces as a
/// validation failure rather than a decode failure. Call
/// [`CreateProduct::into_new`] to obtain an insertable [`NewProduct`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(required, length(min = 1))]
    pub code: Option<String>,
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required)]
    pub price: Option<Decimal>,
    #[serde(rename = "deskripsi", alias = "description")]
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
}

/// A validated product ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub price: Decimal,
    pub description: String,
}

/// Update payload. Absent fields, and strings left empty, keep their
/// stored value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateProduct {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(rename = "deskripsi", alias = "description")]
    pub description: Option<String>,
}

impl CreateProduct {
    /// Check required fields and the price range.
    pub fn into_new(self) -> Result<NewProduct, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(describe(&e)))?;

        let (Some(code), Some(name), Some(price), Some(description)) =
            (self.code, self.name, self.price, self.description)
        else {
            return Err(CoreError::Validation(
                "missing required product field".into(),
            ));
        };

        check_price(price)?;

        Ok(NewProduct {
            code,
            name,
            price,
            description,
        })
    }
}

impl UpdateProduct {
    /// Drop empty strings so they count as "not provided", and check the
    /// price range when a price is given.
    pub fn normalize(self) -> Result<Self, CoreError> {
        if let Some(price) = self.price {
            check_price(price)?;
        }

        Ok(Self {
            code: self.code.filter(|s| !s.is_empty()),
            name: self.name.filter(|s| !s.is_empty()),
            price: self.price,
            description: self.description.filter(|s| !s.is_empty()),
        })
    }
}

fn check_price(price: Decimal) -> Result<(), CoreError> {
    if price.abs() > max_price() {
        return Err(CoreError::Validation(format!(
            "price: {price} exceeds the maximum of {}",
            max_price()
        )));
    }
    Ok(())
}

/// Flatten validator output into `field: rule` pairs, sorted by field.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(move |e| format!("{field}: failed on the '{}' rule", e.code))
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
