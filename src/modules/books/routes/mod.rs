//! HTTP handlers for the books module.
//!
//! Each handler decodes its inputs, calls [`BookService`], and renders the
//! `{status, message, data}` envelope. Malformed bodies or queries never
//! reach the service.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use bookshelf_http::{ApiResponse, AppError};
use serde_json::json;

use super::models::{BookPayload, ListQuery};
use super::service::BookService;

/// Router for `/books`, relative to the module mount point.
pub fn router(service: BookService) -> Router {
    Router::new()
        .route("/", get(list_books).post(add_book))
        .route("/health", get(health_check))
        .route(
            "/{book_id}",
            get(get_book).put(edit_book).delete(delete_book),
        )
        .with_state(service)
}

async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn add_book(
    State(service): State<BookService>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse, AppError> {
    let Json(payload) = payload?;
    let book_id = service.create(payload).await?;

    Ok(ApiResponse::created()
        .message("Buku berhasil ditambahkan")
        .data(json!({ "bookId": book_id })))
}

async fn list_books(
    State(service): State<BookService>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ApiResponse, AppError> {
    let Query(query) = query?;
    let books = service.list(&query).await;

    Ok(ApiResponse::ok().data(json!({ "books": books })))
}

async fn get_book(
    State(service): State<BookService>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse, AppError> {
    let book = service.get(&book_id).await?;

    Ok(ApiResponse::ok().data(json!({ "book": book })))
}

async fn edit_book(
    State(service): State<BookService>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse, AppError> {
    let Json(payload) = payload?;
    service.update(&book_id, payload).await?;

    Ok(ApiResponse::ok().message("Buku berhasil diperbarui"))
}

async fn delete_book(
    State(service): State<BookService>,
    Path(book_id): Path<String>,
) -> Result<ApiResponse, AppError> {
    service.delete(&book_id).await?;

    Ok(ApiResponse::ok().message("Buku berhasil dihapus"))
}
