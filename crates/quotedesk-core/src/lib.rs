//! # quotedesk-core: Pure Business Logic for QuoteDesk
//!
//! Everything that can be decided without touching storage lives here: the
//! quote aggregate and its totals, integer money, input validation and the
//! domain error types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        QuoteDesk Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/api (HTTP boundary, axum)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ quotedesk-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   quote   │  │   money   │  │ validation│  │   │
//! │  │   │   Item    │  │   Quote   │  │   Money   │  │   rules   │  │   │
//! │  │   │  TaxRate  │  │ LineItem  │  │  tax math │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            quotedesk-db (SQLite catalog + quote store)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog item and tax rate types
//! - [`quote`] - The quote aggregate and its creation commands
//! - [`money`] - Integer money in minor units
//! - [`error`] - Domain error types
//! - [`validation`] - Input rules shared by the store and the boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use quotedesk_core::{Item, ItemId, LineItem, Quote, QuoteId};
//!
//! let mouse = Item::new(ItemId::new(1), "Wireless mouse", 3500);
//! let cable = Item::new(ItemId::new(2), "USB cable", 1000);
//!
//! let mut quote = Quote::header(QuoteId::new(1), "ACME Corp", Utc::now());
//! quote.push_line(LineItem::new(mouse, 2));
//! quote.push_line(LineItem::new(cable, 1));
//!
//! assert_eq!(quote.subtotal().cents(), 8000);
//! assert_eq!(quote.item_count(), 3);
//! assert!((quote.total_with_tax() - 9680.0).abs() < 1e-6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::{LineItem, NewLine, NewQuote, Quote, QuoteId};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax applied to every quote: 21%, in basis points.
///
/// Fixed policy. There is no per-quote or per-item override.
pub const QUOTE_TAX_RATE: TaxRate = TaxRate::from_bps(2100);

/// Maximum length of a quote's recipient name, in characters.
pub const MAX_RECIPIENT_NAME_LEN: usize = 200;

/// Maximum length of a catalog item description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Maximum quantity on a single quote line.
///
/// Keeps `unit price × quantity` far from the `i64` limit for any
/// realistic catalog price.
pub const MAX_LINE_QUANTITY: i64 = 999_999;
