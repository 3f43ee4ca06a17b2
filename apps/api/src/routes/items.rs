//! Catalog endpoints (read only).

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};

use quotedesk_core::{CoreError, ItemId};
use quotedesk_db::Database;

use crate::dto::ItemDto;
use crate::error::ApiError;

pub fn router() -> Router<Database> {
    Router::new()
        .route("/", get(list_items))
        .route("/:id", get(get_item))
}

pub async fn list_items(State(db): State<Database>) -> Result<Json<Vec<ItemDto>>, ApiError> {
    let items = db.items().list().await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

pub async fn get_item(
    State(db): State<Database>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ItemDto>, ApiError> {
    let Path(id) = path?;

    let item = db
        .items()
        .get_by_id(ItemId::new(id))
        .await?
        .ok_or(CoreError::ItemNotFound(id))?;

    Ok(Json(ItemDto::from(item)))
}
