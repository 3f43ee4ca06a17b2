//! Quote endpoints.
//!
//! ```text
//!   POST   /api/quotes              create with initial lines   201 {id}
//!   GET    /api/quotes              list headers                200 [..]
//!   GET    /api/quotes/:id          quote with lines + totals   200 | 404
//!   DELETE /api/quotes/:id          quote and its lines         204 | 404
//!   POST   /api/quotes/:id/lines    append one line             200 | 404 | 422
//! ```

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::info;

use quotedesk_core::{CoreError, QuoteId};
use quotedesk_db::Database;

use crate::dto::{
    CreateQuoteRequest, CreatedQuoteResponse, LineAddedResponse, LineRequest, QuoteDto,
    QuoteSummaryDto,
};
use crate::error::ApiError;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/", post(create_quote).get(list_quotes))
        .route("/:id", get(get_quote).delete(delete_quote))
        .route("/:id/lines", post(add_line))
}

pub async fn create_quote(
    State(db): State<Database>,
    payload: Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedQuoteResponse>), ApiError> {
    let Json(body) = payload?;
    let new_quote = body.into_command(Utc::now())?;

    let id = db.quotes().create(&new_quote).await?;
    info!(id = %id, recipient = %new_quote.recipient_name(), "Quote created via API");

    Ok((StatusCode::CREATED, Json(CreatedQuoteResponse { id: id.get() })))
}

pub async fn list_quotes(State(db): State<Database>) -> Result<Json<Vec<QuoteSummaryDto>>, ApiError> {
    let quotes = db.quotes().list().await?;
    Ok(Json(quotes.into_iter().map(QuoteSummaryDto::from).collect()))
}

pub async fn get_quote(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<QuoteDto>, ApiError> {
    let Path(id) = path?;

    let quote = db
        .quotes()
        .get_by_id(QuoteId::new(id))
        .await?
        .ok_or(CoreError::QuoteNotFound(id))?;

    Ok(Json(QuoteDto::from(&quote)))
}

pub async fn add_line(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<LineRequest>, JsonRejection>,
) -> Result<Json<LineAddedResponse>, ApiError> {
    let Path(id) = path?;
    let Json(body) = payload?;
    let line = body.into_command()?;

    db.quotes().add_line(QuoteId::new(id), &line).await?;

    Ok(Json(LineAddedResponse { quote_id: id }))
}

pub async fn delete_quote(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    let quote_id = QuoteId::new(id);

    let repo = db.quotes();
    if !repo.exists(quote_id).await? {
        return Err(CoreError::QuoteNotFound(id).into());
    }

    repo.delete(quote_id).await?;
    info!(id = %quote_id, "Quote deleted via API");

    Ok(StatusCode::NO_CONTENT)
}
