//! # Quote Aggregate
//!
//! In-memory representation of a quote with its line items, plus the
//! validated commands used to create one.
//!
//! ## Derived Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quote #12 "ACME Corp"                                                  │
//! │                                                                         │
//! │  Line   Item              Unit     Qty    Subtotal                      │
//! │  ────   ───────────────   ──────   ───    ────────                      │
//! │  1      Wireless mouse    3500     2      7000                          │
//! │  2      USB cable         1000     1      1000                          │
//! │                                                                         │
//! │  subtotal()        = 7000 + 1000      = 8000      (exact, Money)        │
//! │  item_count()      = 2 + 1            = 3                               │
//! │  total_with_tax()  = 8000 × 1.21      = 9680.0    (f64)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is cached. Every accessor folds over the current `lines`, so
//! a quote that gained a line since the last call reports the new totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Item, ItemId};
use crate::validation::{validate_quantity, validate_recipient_name};
use crate::QUOTE_TAX_RATE;

// =============================================================================
// Quote Identifier
// =============================================================================

/// Store-assigned identifier of a quote. Never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct QuoteId(i64);

impl QuoteId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        QuoteId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A catalog item and a quantity attached to a quote.
///
/// The embedded [`Item`] is whatever the catalog held when the quote was
/// read, not a snapshot taken when the line was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub item: Item,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(item: Item, quantity: i64) -> Self {
        LineItem { item, quantity }
    }

    /// `unit price × quantity`.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.item.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A budget document addressed to a recipient.
///
/// A quote read through a list operation carries an empty `lines` vector
/// even when lines exist in storage; only a detail read populates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quote {
    pub id: QuoteId,
    pub recipient_name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
}

impl Quote {
    /// Builds a quote header with no lines.
    pub fn header(id: QuoteId, recipient_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Quote {
            id,
            recipient_name: recipient_name.into(),
            created_at,
            lines: Vec::new(),
        }
    }

    /// Appends a line.
    pub fn push_line(&mut self, line: LineItem) {
        self.lines.push(line);
    }

    /// Sum of all line subtotals.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(LineItem::subtotal).sum()
    }

    /// Tax on the subtotal at [`QUOTE_TAX_RATE`], rounded to a whole
    /// minor unit.
    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(QUOTE_TAX_RATE)
    }

    /// `subtotal × 1.21` in floating point.
    pub fn total_with_tax(&self) -> f64 {
        self.subtotal().with_tax_f64(QUOTE_TAX_RATE)
    }

    /// Subtotal plus rounded tax, as exact Money.
    pub fn total_with_tax_cents(&self) -> Money {
        self.subtotal() + self.tax()
    }

    /// Sum of all line quantities, saturating like [`Money`].
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |count, line| count.saturating_add(line.quantity))
    }

    /// Number of lines (not units).
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Creation Commands
// =============================================================================

/// A validated request to attach an item to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLine {
    item_id: ItemId,
    quantity: i64,
}

impl NewLine {
    /// Validates the quantity and builds the line.
    ///
    /// Whether `item_id` exists is checked by the store, inside the same
    /// transaction as the insert.
    pub fn new(item_id: ItemId, quantity: i64) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        Ok(NewLine { item_id, quantity })
    }

    /// Like [`NewLine::new`] but for payloads where the item reference may
    /// be absent.
    pub fn from_optional(item_id: Option<ItemId>, quantity: i64) -> CoreResult<Self> {
        let item_id = item_id.ok_or_else(|| ValidationError::required("item_id"))?;
        NewLine::new(item_id, quantity)
    }

    #[inline]
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }
}

/// A validated request to create a quote with its initial lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    recipient_name: String,
    created_at: DateTime<Utc>,
    lines: Vec<NewLine>,
}

impl NewQuote {
    /// Validates the recipient name and builds the command.
    ///
    /// The name is stored trimmed. `lines` may be empty.
    pub fn new(recipient_name: &str, created_at: DateTime<Utc>, lines: Vec<NewLine>) -> CoreResult<Self> {
        validate_recipient_name(recipient_name)?;

        Ok(NewQuote {
            recipient_name: recipient_name.trim().to_string(),
            created_at,
            lines,
        })
    }

    pub fn recipient_name(&self) -> &str {
        &self.recipient_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn lines(&self) -> &[NewLine] {
        &self.lines
    }

    /// Distinct item ids referenced by the initial lines, ascending.
    pub fn item_ids(&self) -> BTreeSet<ItemId> {
        self.lines.iter().map(NewLine::item_id).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
