//! Product catalog.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::catalog::{Page, Product, ProductQuery};
use maison_data::FetchClient;

/// One page of products matching `query`.
pub async fn list(client: &FetchClient, query: &ProductQuery) -> ServiceResult<Page<Product>> {
    let page = client
        .get("/products")
        .query_pairs(query.to_query_pairs())
        .send_data::<Page<Product>>()
        .await?;
    tracing::debug!(total = page.total, page = page.page, "products listed");
    Ok(page)
}

/// A product by handle, or `None` when it does not exist.
pub async fn by_handle(client: &FetchClient, handle: &str) -> ServiceResult<Option<Product>> {
    match client
        .get(format!("/products/{}", segment(handle)))
        .send_data::<Product>()
        .await
    {
        Ok(product) => Ok(Some(product)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// "You may also like" products, excluding the product itself.
pub async fn related(client: &FetchClient, handle: &str, limit: u32) -> ServiceResult<Vec<Product>> {
    let products: Vec<Product> = client
        .get(format!("/products/{}/related", segment(handle)))
        .query("limit", limit.to_string())
        .send_data()
        .await?;
    Ok(products
        .into_iter()
        .filter(|p| p.handle != handle)
        .take(limit as usize)
        .collect())
}

/// Products of a collection for a homepage carousel.
pub async fn collection(client: &FetchClient, collection: &str, limit: u32) -> ServiceResult<Vec<Product>> {
    let query = ProductQuery::new()
        .in_collection(collection)
        .with_pagination(1, limit);
    Ok(list(client, &query).await?.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, mock};
    use maison_commerce::catalog::SortOption;
    use serde_json::json;

    fn product_json(handle: &str) -> serde_json::Value {
        json!({
            "id": format!("p-{}", handle),
            "handle": handle,
            "title": handle,
            "price": {"amount": 99900, "currencyCode": "INR"}
        })
    }

    #[tokio::test]
    async fn test_list_sends_query() {
        let mock = mock();
        mock.push_json(200, json!({
            "data": {"items": [product_json("kurta")], "page": 2, "perPage": 12, "total": 13}
        }));

        let query = ProductQuery::new()
            .in_collection("festive")
            .with_sort(SortOption::Newest)
            .with_pagination(2, 12);
        let page = list(&client(&mock), &query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next());

        assert_eq!(
            mock.last_request().unwrap().url(),
            "https://api.test/products?collection=festive&sort=newest&page=2&perPage=12"
        );
    }

    #[tokio::test]
    async fn test_by_handle_not_found_is_none() {
        let mock = mock();
        mock.push_json(404, json!({"message": "Product not found"}));
        mock.push_json(200, product_json("silk scarf"));

        assert!(by_handle(&client(&mock), "gone").await.unwrap().is_none());
        let p = by_handle(&client(&mock), "silk scarf").await.unwrap().unwrap();
        assert_eq!(p.handle, "silk scarf");
        assert_eq!(
            mock.last_request().unwrap().url(),
            "https://api.test/products/silk%20scarf"
        );
    }

    #[tokio::test]
    async fn test_by_handle_server_error_propagates() {
        let mock = mock();
        mock.push_json(500, json!({"message": "boom"}));
        assert!(by_handle(&client(&mock), "x").await.is_err());
    }

    #[tokio::test]
    async fn test_related_excludes_self() {
        let mock = mock();
        mock.push_json(200, json!([product_json("a"), product_json("b"), product_json("c")]));

        let related = related(&client(&mock), "a", 4).await.unwrap();
        let handles: Vec<_> = related.iter().map(|p| p.handle.as_str()).collect();
        assert_eq!(handles, vec!["b", "c"]);
        assert!(mock.last_request().unwrap().url().ends_with("/products/a/related?limit=4"));
    }
}
