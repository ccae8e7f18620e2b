//! Site navigation menu.

use crate::error::ServiceResult;
use maison_commerce::content::{self, NavItem};
use maison_data::FetchClient;

/// The menu tree, sorted by position at every level.
pub async fn get(client: &FetchClient) -> ServiceResult<Vec<NavItem>> {
    let mut items: Vec<NavItem> = client.get("/navbar").send_data().await?;
    content::sort_tree(&mut items);
    Ok(items)
}

/// Admin: replace the whole menu. Positions are rewritten from the given order.
pub async fn save(client: &FetchClient, items: &[NavItem]) -> ServiceResult<Vec<NavItem>> {
    content::validate_tree(items)?;
    let mut ordered = items.to_vec();
    content::renumber(&mut ordered);

    let mut saved: Vec<NavItem> = client.put("/admin/navbar").json(&ordered)?.send_data().await?;
    content::sort_tree(&mut saved);
    tracing::info!(items = saved.len(), "navigation saved");
    Ok(saved)
}
