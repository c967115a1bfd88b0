// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Zoftwarehub

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::AuthenticatedUser,
    models::{
        ItemResponse, LoginData, LoginRequest, LoginResponse, MeResponse, Page, Pagination,
        Product, ProductSummary, UserEnvelope, VerifyData, VerifyResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod products;

pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/me", get(auth::me));

    // Catalog routes are gated per-handler by the Auth extractor
    let product_routes = Router::new()
        .route("/products", get(products::list_products))
        .route("/products/minimal", get(products::list_products_minimal))
        .route("/products/{id}", get(products::get_product))
        .route("/products/slug/{slug}", get(products::get_products_by_slug));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    Router::new()
        .merge(auth_routes)
        .merge(product_routes)
        .merge(health_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::verify,
        auth::me,
        products::list_products,
        products::list_products_minimal,
        products::get_product,
        products::get_products_by_slug,
        health::health,
        health::liveness
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LoginData,
            UserEnvelope,
            VerifyResponse,
            VerifyData,
            MeResponse,
            AuthenticatedUser,
            Product,
            ProductSummary,
            Pagination,
            Page<Product>,
            Page<ProductSummary>,
            ItemResponse<Product>,
            ItemResponse<Vec<Product>>,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Login and token introspection"),
        (name = "Products", description = "Product catalog read API"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;
