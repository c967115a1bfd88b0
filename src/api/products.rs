// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

//! Product catalog read endpoints.
//!
//! Plain paginated queries against the embedded catalog store. Every route
//! sits behind the bearer-token gate but is otherwise independent of the
//! auth subsystem.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::Auth,
    catalog::{CatalogError, SortOrder},
    error::ApiError,
    models::{ItemResponse, Page, Product, ProductSummary},
    state::AppState,
};

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<u64>,
    /// Items per page, capped at 100.
    pub page_size: Option<u64>,
}

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MinimalListQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// `latest` (default) or `oldest`.
    pub sort_by: Option<String>,
}

fn fetch_failed(e: CatalogError, what: &'static str) -> ApiError {
    tracing::error!(error = %e, "Catalog query failed");
    ApiError::internal(what)
}

#[utoipa::path(
    get,
    path = "/products",
    params(ListQuery),
    tag = "Products",
    responses(
        (status = 200, description = "Paginated products", body = Page<Product>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_products(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Page<Product>>, ApiError> {
    let page = state
        .catalog
        .list(params.page, params.page_size)
        .map_err(|e| fetch_failed(e, "Failed to fetch products"))?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/products/minimal",
    params(MinimalListQuery),
    tag = "Products",
    responses(
        (status = 200, description = "Paginated product cards", body = Page<ProductSummary>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_products_minimal(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Query(params): Query<MinimalListQuery>,
) -> Result<Json<Page<ProductSummary>>, ApiError> {
    let sort = SortOrder::from_query(params.sort_by.as_deref());
    let page = state
        .catalog
        .list_minimal(params.page, params.page_size, sort)
        .map_err(|e| fetch_failed(e, "Failed to fetch products"))?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product identifier")),
    tag = "Products",
    responses(
        (status = 200, description = "The product", body = ItemResponse<Product>),
        (status = 404, description = "Product not found"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_product(
    Auth(_user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ItemResponse<Product>>, ApiError> {
    let product = state
        .catalog
        .get(&id)
        .map_err(|e| fetch_failed(e, "Failed to fetch product"))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(ItemResponse {
        success: true,
        data: product,
    }))
}

#[utoipa::path(
    get,
    path = "/products/slug/{slug}",
    params(("slug" = String, Path, description = "Product slug")),
    tag = "Products",
    responses(
        (status = 200, description = "Products matching the slug", body = ItemResponse<Vec<Product>>),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn get_products_by_slug(
    Auth(_user): Auth,
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ItemResponse<Vec<Product>>>, ApiError> {
    let products = state
        .catalog
        .by_slug(&slug)
        .map_err(|e| fetch_failed(e, "Failed to search products by slug"))?;

    Ok(Json(ItemResponse {
        success: true,
        data: products,
    }))
}
