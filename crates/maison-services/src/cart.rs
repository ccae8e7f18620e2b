//! Server-side cart. Each call returns the full cart as the backend now
//! sees it, which callers treat as the new snapshot.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::cart::{Cart, NewCartLine, MAX_LINE_QUANTITY};
use maison_commerce::ids::LineItemId;
use maison_commerce::CommerceError;
use maison_data::FetchClient;
use serde::Serialize;

#[derive(Serialize)]
struct QuantityBody {
    quantity: u32,
}

pub async fn fetch(client: &FetchClient) -> ServiceResult<Cart> {
    Ok(client.get("/cart").send_data().await?)
}

pub async fn add_line(client: &FetchClient, line: &NewCartLine) -> ServiceResult<Cart> {
    line.validate()?;
    let cart: Cart = client.post("/cart/lines").json(line)?.send_data().await?;
    tracing::debug!(product_id = %line.product_id, quantity = line.quantity, "cart line added");
    Ok(cart)
}

/// Set a line's quantity. Zero removes the line.
pub async fn update_quantity(client: &FetchClient, line_id: &LineItemId, quantity: u32) -> ServiceResult<Cart> {
    if quantity == 0 {
        return remove_line(client, line_id).await;
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CommerceError::QuantityExceedsLimit(quantity, MAX_LINE_QUANTITY).into());
    }
    Ok(client
        .patch(format!("/cart/lines/{}", segment(line_id)))
        .json(&QuantityBody { quantity })?
        .send_data()
        .await?)
}

pub async fn remove_line(client: &FetchClient, line_id: &LineItemId) -> ServiceResult<Cart> {
    Ok(client
        .delete(format!("/cart/lines/{}", segment(line_id)))
        .send_data()
        .await?)
}

pub async fn clear(client: &FetchClient) -> ServiceResult<Cart> {
    Ok(client.delete("/cart").send_data().await?)
}
