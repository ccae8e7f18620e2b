//! Checkout and order history.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::catalog::Page;
use maison_commerce::ids::OrderId;
use maison_commerce::order::{Order, OrderStatus, PlaceOrder, StatusUpdate};
use maison_data::FetchClient;

pub async fn place(client: &FetchClient, order: &PlaceOrder) -> ServiceResult<Order> {
    order.validate()?;
    let placed: Order = client.post("/orders").json(order)?.send_data().await?;
    tracing::info!(order = %placed.number, total = placed.total.amount, "order placed");
    Ok(placed)
}

/// The signed-in customer's orders, newest first.
pub async fn mine(client: &FetchClient) -> ServiceResult<Vec<Order>> {
    let mut orders: Vec<Order> = client.get("/orders/mine").send_data().await?;
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    Ok(orders)
}

pub async fn get(client: &FetchClient, id: &OrderId) -> ServiceResult<Order> {
    Ok(client
        .get(format!("/orders/{}", segment(id)))
        .send_data()
        .await?)
}

/// Cancel an order. The current status is checked locally first.
pub async fn cancel(client: &FetchClient, order: &Order) -> ServiceResult<Order> {
    order.ensure_cancellable()?;
    let cancelled: Order = client
        .post(format!("/orders/{}/cancel", segment(&order.id)))
        .send_data()
        .await?;
    tracing::info!(order = %cancelled.number, "order cancelled");
    Ok(cancelled)
}

/// Admin: all orders, optionally filtered by status.
pub async fn admin_list(
    client: &FetchClient,
    status: Option<OrderStatus>,
    page: u32,
) -> ServiceResult<Page<Order>> {
    let mut request = client.get("/admin/orders").query("page", page.max(1).to_string());
    if let Some(status) = status {
        request = request.query("status", status.as_str());
    }
    Ok(request.send_data().await?)
}

pub async fn update_status(client: &FetchClient, id: &OrderId, status: OrderStatus) -> ServiceResult<Order> {
    let order: Order = client
        .patch(format!("/admin/orders/{}/status", segment(id)))
        .json(&StatusUpdate { status })?
        .send_data()
        .await?;
    tracing::info!(order = %order.number, status = status.as_str(), "order status updated");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::testing::{client, mock};
    use maison_commerce::order::{PaymentMethod, ShippingAddress};
    use maison_commerce::CommerceError;
    use serde_json::json;

    fn order_json(id: &str, status: &str, placed_at: &str) -> serde_json::Value {
        json!({
            "id": id,
            "number": format!("MSN-{}", id),
            "status": status,
            "lines": [],
            "shippingAddress": {
                "fullName": "Asha", "phone": "9876543210", "line1": "12 MG Road",
                "city": "Pune", "state": "MH", "postalCode": "411001"
            },
            "subtotal": {"amount": 1000, "currencyCode": "INR"},
            "total": {"amount": 1000, "currencyCode": "INR"},
            "placedAt": placed_at
        })
    }

    #[tokio::test]
    async fn test_place_validates_first() {
        let mock = mock();
        let order = PlaceOrder {
            source: maison_commerce::order::OrderSource::Cart,
            lines: vec![],
            shipping_address: ShippingAddress::default(),
            payment_method: PaymentMethod::Upi,
            note: None,
        };
        let err = place(&client(&mock), &order).await.unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref errors) if errors.len() > 1));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_mine_sorted_newest_first() {
        let mock = mock();
        mock.push_json(200, json!([
            order_json("1", "delivered", "2024-01-05T10:00:00Z"),
            order_json("2", "pending", "2024-03-01T10:00:00Z"),
        ]));
        let orders = mine(&client(&mock)).await.unwrap();
        assert_eq!(orders[0].id.as_str(), "2");
    }

    #[tokio::test]
    async fn test_cancel_checks_status_locally() {
        let mock = mock();
        let shipped: Order =
            serde_json::from_value(order_json("9", "shipped", "2024-03-01T10:00:00Z")).unwrap();
        assert!(matches!(
            cancel(&client(&mock), &shipped).await,
            Err(ServiceError::Domain(CommerceError::NotCancellable { .. }))
        ));
        assert!(mock.requests().is_empty());

        let pending: Order =
            serde_json::from_value(order_json("8", "pending", "2024-03-01T10:00:00Z")).unwrap();
        mock.push_json(200, order_json("8", "cancelled", "2024-03-01T10:00:00Z"));
        let cancelled = cancel(&client(&mock), &pending).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert!(mock.last_request().unwrap().url().ends_with("/orders/8/cancel"));
    }

    #[tokio::test]
    async fn test_admin_list_and_update_status() {
        let mock = mock();
        mock.push_json(200, json!({"items": [], "page": 1, "perPage": 24, "total": 0}));
        mock.push_json(200, order_json("3", "shipped", "2024-03-01T10:00:00Z"));

        admin_list(&client(&mock), Some(OrderStatus::Pending), 0).await.unwrap();
        let order = update_status(&client(&mock), &OrderId::new("3"), OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Shipped);

        let requests = mock.requests();
        assert_eq!(requests[0].url(), "https://api.test/admin/orders?page=1&status=pending");
        assert_eq!(requests[1].body_json().unwrap(), json!({"status": "shipped"}));
    }
}
