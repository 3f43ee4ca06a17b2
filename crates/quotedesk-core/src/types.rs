//! # Domain Types
//!
//! Catalog types shared by the quote aggregate and the storage layer.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │    NewItem      │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  description    │   │  bps (u32)      │       │
//! │  │  description    │   │  unit_price     │   │  2100 = 21%     │       │
//! │  │  unit_price     │   │  (validated)    │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item identifiers are assigned by the store (SQLite rowid), so they are
//! plain integers wrapped in a newtype to keep them apart from quote ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::validation::{validate_description, validate_price_cents};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 2100 bps = 21%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns `1 + rate`, e.g. `1.21` for 21%.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        1.0 + self.0 as f64 / 10_000.0
    }
}

// =============================================================================
// Item Identifier
// =============================================================================

/// Store-assigned identifier of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct ItemId(i64);

impl ItemId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ItemId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Item
// =============================================================================

/// A priced catalog item.
///
/// Quotes reference items; they never own or modify them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: ItemId,

    /// Human-readable description, never empty.
    pub description: String,

    /// Unit price in minor currency units, never negative.
    pub unit_price_cents: i64,
}

impl Item {
    pub fn new(id: ItemId, description: impl Into<String>, unit_price_cents: i64) -> Self {
        Item {
            id,
            description: description.into(),
            unit_price_cents,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

/// A catalog item that has not been stored yet.
///
/// Only constructible through [`NewItem::new`], which validates the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    description: String,
    unit_price_cents: i64,
}

impl NewItem {
    /// Validates and builds a new catalog item.
    ///
    /// The description is stored trimmed.
    pub fn new(description: &str, unit_price_cents: i64) -> CoreResult<Self> {
        validate_description(description)?;
        validate_price_cents(unit_price_cents)?;

        Ok(NewItem {
            description: description.trim().to_string(),
            unit_price_cents,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_price_cents(&self) -> i64 {
        self.unit_price_cents
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(2100);
        assert_eq!(rate.bps(), 2100);
        assert!((rate.multiplier() - 1.21).abs() < 1e-12);
    }

    #[test]
    fn test_item_unit_price() {
        let item = Item::new(ItemId::new(4), "Keyboard", 9500);
        assert_eq!(item.unit_price(), Money::from_cents(9500));
        assert_eq!(item.id.to_string(), "4");
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let item = Item::new(ItemId::new(1), "Mouse", 3500);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["unitPriceCents"], 3500);
    }

    #[test]
    fn test_new_item_validation() {
        let item = NewItem::new("  Mouse  ", 3500).unwrap();
        assert_eq!(item.description(), "Mouse");
        assert_eq!(item.unit_price_cents(), 3500);

        assert!(NewItem::new("Free sample", 0).is_ok());
        assert!(matches!(
            NewItem::new("", 100),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            NewItem::new("Mouse", -1),
            Err(CoreError::Validation(_))
        ));
    }
}
