use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use merx_catalog::validate::{self, FixedCap};
use merx_catalog::{DiscountRuleInput, NewProductInput, Product};

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProductResponse {
    status: bool,
    message: &'static str,
    product_id: Uuid,
    final_price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductInfoResponse {
    status: bool,
    message: &'static str,
    results: Product,
    final_price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FinalPriceResponse {
    status: bool,
    message: &'static str,
    final_price: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyDiscountResponse {
    status: bool,
    message: &'static str,
    updated_final_price: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/{id}", get(product_info))
        .route("/products/{id}/price", get(final_price))
        .route("/products/{id}/discount", post(apply_discount))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /products
/// Validate and persist a new product, returning its computed final price
async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<NewProductInput>,
) -> Result<(StatusCode, Json<CreateProductResponse>), ApiError> {
    let product = req.into_product()?;

    state
        .products
        .save(&product)
        .await
        .map_err(|e| ApiError::internal("Error creating product", anyhow::anyhow!(e)))?;

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            status: true,
            message: "Product created successfully",
            product_id: product.id,
            final_price: product.final_price(),
        }),
    ))
}

/// GET /products/{id}
/// Fetch a product together with its computed final price
async fn product_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductInfoResponse>, ApiError> {
    const MESSAGE: &str = "Error fetching product information";

    // A malformed id surfaces as a fetch failure, not a 400.
    let id =
        Uuid::parse_str(&id).map_err(|e| ApiError::internal(MESSAGE, anyhow::anyhow!(e)))?;

    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal(MESSAGE, anyhow::anyhow!(e)))?
        .ok_or(ApiError::NotFound)?;

    let final_price = product.final_price();

    Ok(Json(ProductInfoResponse {
        status: true,
        message: "Product information retrieved successfully.",
        results: product,
        final_price,
    }))
}

/// GET /products/{id}/price
/// Fetch the computed final price only
async fn final_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FinalPriceResponse>, ApiError> {
    const MESSAGE: &str = "Error calculating the final price";

    let id =
        Uuid::parse_str(&id).map_err(|e| ApiError::internal(MESSAGE, anyhow::anyhow!(e)))?;

    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal(MESSAGE, anyhow::anyhow!(e)))?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(FinalPriceResponse {
        status: true,
        message: "Final price calculated successfully.",
        final_price: product.final_price(),
    }))
}

/// POST /products/{id}/discount
/// Append a discount rule and return the updated final price
async fn apply_discount(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<DiscountRuleInput>,
) -> Result<Json<ApplyDiscountResponse>, ApiError> {
    const MESSAGE: &str = "Error applying discount";

    // 1. Type and value checks run before the lookup, so a bad rule aimed
    //    at a missing product reports 400 rather than 404.
    let rule = req.into_rule()?;

    let id =
        Uuid::parse_str(&id).map_err(|e| ApiError::internal(MESSAGE, anyhow::anyhow!(e)))?;

    // 2. Load the product; the base-price-dependent caps need it. The
    //    append-time fixed cap is inclusive of the base price.
    let mut product = state
        .products
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal(MESSAGE, anyhow::anyhow!(e)))?
        .ok_or(ApiError::NotFound)?;

    validate::check_caps(&rule, product.base_price, FixedCap::AtMostBase)?;

    // 3. Mutate and write back. Plain read-modify-write; concurrent
    //    appends to the same product can lose one update.
    product.apply_discount(rule);

    state
        .products
        .save(&product)
        .await
        .map_err(|e| ApiError::internal(MESSAGE, anyhow::anyhow!(e)))?;

    Ok(Json(ApplyDiscountResponse {
        status: true,
        message: "Discount applied successfully.",
        updated_final_price: product.final_price(),
    }))
}
