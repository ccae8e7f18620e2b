//! Saved products.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::cart::WishlistItem;
use maison_commerce::ids::ProductId;
use maison_data::FetchClient;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddBody<'a> {
    product_id: &'a ProductId,
}

pub async fn fetch(client: &FetchClient) -> ServiceResult<Vec<WishlistItem>> {
    Ok(client.get("/wishlist").send_data().await?)
}

/// Save a product. Returns the updated list.
pub async fn add(client: &FetchClient, product_id: &ProductId) -> ServiceResult<Vec<WishlistItem>> {
    Ok(client
        .post("/wishlist")
        .json(&AddBody { product_id })?
        .send_data()
        .await?)
}

pub async fn remove(client: &FetchClient, product_id: &ProductId) -> ServiceResult<Vec<WishlistItem>> {
    Ok(client
        .delete(format!("/wishlist/{}", segment(product_id)))
        .send_data()
        .await?)
}
