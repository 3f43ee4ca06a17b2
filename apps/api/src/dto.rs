//! Request/response bodies for the HTTP API.
//!
//! JSON field names are camelCase. Requests are deserialized leniently
//! (missing optional fields become `None`) and then turned into validated
//! core commands, so every rule lives in quotedesk-core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quotedesk_core::{CoreResult, Item, ItemId, LineItem, NewLine, NewQuote, Quote};

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/quotes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    #[serde(default)]
    pub recipient_name: Option<String>,

    #[serde(default)]
    pub lines: Vec<LineRequest>,
}

/// One line, either inside a create request or on its own for
/// `POST /api/quotes/{id}/lines`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    #[serde(default)]
    pub item_id: Option<i64>,
    pub quantity: i64,
}

impl LineRequest {
    pub fn into_command(self) -> CoreResult<NewLine> {
        NewLine::from_optional(self.item_id.map(ItemId::new), self.quantity)
    }
}

impl CreateQuoteRequest {
    /// Validates the request; `created_at` is stamped by the caller.
    pub fn into_command(self, created_at: DateTime<Utc>) -> CoreResult<NewQuote> {
        let lines = self
            .lines
            .into_iter()
            .map(LineRequest::into_command)
            .collect::<CoreResult<Vec<_>>>()?;

        NewQuote::new(
            self.recipient_name.as_deref().unwrap_or_default(),
            created_at,
            lines,
        )
    }
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreatedQuoteResponse {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAddedResponse {
    pub quote_id: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i64,
    pub description: String,
    pub unit_price_cents: i64,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        ItemDto {
            id: item.id.get(),
            description: item.description,
            unit_price_cents: item.unit_price_cents,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub item_id: i64,
    pub description: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&LineItem> for LineDto {
    fn from(line: &LineItem) -> Self {
        LineDto {
            item_id: line.item.id.get(),
            description: line.item.description.clone(),
            unit_price_cents: line.item.unit_price_cents,
            quantity: line.quantity,
            subtotal_cents: line.subtotal().cents(),
        }
    }
}

/// Full quote with lines and derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    pub id: i64,
    pub recipient_name: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<LineDto>,
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub total_with_tax_cents: i64,
    /// `subtotal × 1.21` as a float, in minor units.
    pub total_with_tax: f64,
}

impl From<&Quote> for QuoteDto {
    fn from(quote: &Quote) -> Self {
        QuoteDto {
            id: quote.id.get(),
            recipient_name: quote.recipient_name.clone(),
            created_at: quote.created_at,
            lines: quote.lines.iter().map(LineDto::from).collect(),
            item_count: quote.item_count(),
            subtotal_cents: quote.subtotal().cents(),
            tax_cents: quote.tax().cents(),
            total_with_tax_cents: quote.total_with_tax_cents().cents(),
            total_with_tax: quote.total_with_tax(),
        }
    }
}

/// Quote header as returned by the list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryDto {
    pub id: i64,
    pub recipient_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Quote> for QuoteSummaryDto {
    fn from(quote: Quote) -> Self {
        QuoteSummaryDto {
            id: quote.id.get(),
            recipient_name: quote.recipient_name,
            created_at: quote.created_at,
        }
    }
}
