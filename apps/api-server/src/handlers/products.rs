//! Catalog handlers.
//!
//! Admin routes take [`AdminIdentity`] as their first argument so a caller
//! without a valid admin token is turned away before the id or body is
//! parsed.

use actix_web::{HttpResponse, web};

use atelier_core::commands::{NewProduct, ProductPatch, parse_product_id};
use atelier_shared::ApiResponse;
use atelier_shared::dto::{
    CreateProductRequest, Empty, ProductListPayload, ProductPayload, ProductResponse,
    UpdateProductRequest,
};

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/products
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let products: Vec<ProductResponse> = state
        .catalog
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProductListPayload {
        count: products.len(),
        products,
    })))
}

/// POST /api/products/admin
pub async fn create(
    admin: AdminIdentity,
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> AppResult<HttpResponse> {
    let cmd = NewProduct::try_from(body.into_inner())?;
    let product = state.catalog.create(cmd).await?;

    tracing::debug!(admin_id = %admin.0.user_id, product_id = %product.id, "Admin created product");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        ProductPayload {
            product: product.into(),
        },
        "Product created successfully",
    )))
}

/// PUT /api/products/admin/{id}
pub async fn update(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateProductRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_product_id(&path)?;
    let patch = ProductPatch::try_from(body.into_inner())?;
    let product = state.catalog.update(id, patch).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        ProductPayload {
            product: product.into(),
        },
        "Product updated successfully",
    )))
}

/// DELETE /api/products/admin/{id}
pub async fn delete(
    _admin: AdminIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_product_id(&path)?;
    state.catalog.delete(id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        Empty {},
        "Product deleted successfully",
    )))
}
