//! # Validation Module
//!
//! Input rules checked before anything reaches the database.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP boundary (apps/api)                                     │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── Missing item reference on a line                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (via NewQuote / NewLine / NewItem)               │
//! │  ├── Recipient name present and bounded                                │
//! │  └── Quantities positive, prices non-negative                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_DESCRIPTION_LEN, MAX_LINE_QUANTITY, MAX_RECIPIENT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a quote's recipient name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - At most [`MAX_RECIPIENT_NAME_LEN`] characters after trimming
///
/// ```rust
/// use quotedesk_core::validation::validate_recipient_name;
///
/// assert!(validate_recipient_name("ACME Corp").is_ok());
/// assert!(validate_recipient_name("").is_err());
/// assert!(validate_recipient_name("   ").is_err());
/// ```
pub fn validate_recipient_name(name: &str) -> ValidationResult<()> {
    validate_text("recipient_name", name, MAX_RECIPIENT_NAME_LEN)
}

/// Validates a catalog item description.
///
/// Same rules as the recipient name, bounded by [`MAX_DESCRIPTION_LEN`].
pub fn validate_description(description: &str) -> ValidationResult<()> {
    validate_text("description", description, MAX_DESCRIPTION_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - At most [`MAX_LINE_QUANTITY`]
///
/// ```rust
/// use quotedesk_core::validation::validate_quantity;
///
/// assert!(validate_quantity(2).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(10_000_000_000_000_000).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ```rust
/// use quotedesk_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(3500).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit_price_cents".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
