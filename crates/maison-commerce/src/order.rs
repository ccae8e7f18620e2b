//! Orders and checkout requests.

use crate::cart::{BuyNow, Cart, CartLine, NewCartLine};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting confirmation.
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Returned
        )
    }

    /// Customers may cancel until the parcel ships.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Upi,
    Card,
}

impl PaymentMethod {
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on delivery",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
        }
    }
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "India".to_string()
}

impl ShippingAddress {
    /// Format as single line.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.line1.clone()];
        if let Some(line2) = self.line2.as_ref().filter(|l| !l.trim().is_empty()) {
            parts.push(line2.clone());
        }
        parts.push(self.city.clone());
        parts.push(format!("{} {}", self.state, self.postal_code));
        parts.push(self.country.clone());
        parts.join(", ")
    }

    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::required("fullName", &self.full_name),
            validate::phone("phone", &self.phone),
            validate::required("line1", &self.line1),
            validate::required("city", &self.city),
            validate::required("state", &self.state),
            validate::length("postalCode", &self.postal_code, 4, 10),
        ])
    }
}

/// A line on a placed order, priced at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price.try_multiply(i64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Human-facing number, e.g. "MSN-10231".
    pub number: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub subtotal: Money,
    #[serde(default)]
    pub shipping: Option<Money>,
    pub total: Money,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Check the order may be cancelled by its customer.
    pub fn ensure_cancellable(&self) -> Result<(), CommerceError> {
        if self.status.can_cancel() {
            Ok(())
        } else {
            Err(CommerceError::NotCancellable {
                id: self.number.clone(),
                status: self.status.as_str().to_string(),
            })
        }
    }
}

/// Where the items of a checkout come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderSource {
    Cart,
    BuyNow,
}

/// Checkout request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub source: OrderSource,
    pub lines: Vec<NewCartLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub note: Option<String>,
}

impl PlaceOrder {
    pub fn from_cart(
        cart: &Cart,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Self, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::validation("cart", "your bag is empty"));
        }
        Ok(Self {
            source: OrderSource::Cart,
            lines: cart.lines.iter().map(NewCartLine::from).collect(),
            shipping_address,
            payment_method,
            note: None,
        })
    }

    pub fn from_buy_now(
        buy_now: &BuyNow,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            source: OrderSource::BuyNow,
            lines: vec![NewCartLine::from(&buy_now.line)],
            shipping_address,
            payment_method,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = (!note.trim().is_empty()).then_some(note);
        self
    }

    /// Validate every line and the address. All failures are reported.
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        let mut errors = Vec::new();
        if self.lines.is_empty() {
            errors.push(CommerceError::validation("lines", "no items to order"));
        }
        errors.extend(self.lines.iter().filter_map(|l| l.validate().err()));
        if let Err(address_errors) = self.shipping_address.validate() {
            errors.extend(address_errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Admin status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate<S> {
    pub status: S,
}

/// Lines of a cart as they would appear on an order, for the checkout summary.
pub fn preview_lines(lines: &[CartLine]) -> Vec<OrderLine> {
    lines
        .iter()
        .map(|l| OrderLine {
            product_id: l.product_id.clone(),
            title: l.title.clone(),
            image: l.image.clone(),
            size: l.size.clone(),
            color: l.color.clone(),
            quantity: l.quantity,
            unit_price: l.unit_price,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::LineItemId;
    use crate::money::Currency;

    fn address() -> ShippingAddress {
        ShippingAddress {
            full_name: "Asha Kapoor".to_string(),
            phone: "+91 98765 43210".to_string(),
            line1: "12 MG Road".to_string(),
            line2: Some("Flat 4B".to_string()),
            city: "Bengaluru".to_string(),
            state: "Karnataka".to_string(),
            postal_code: "560001".to_string(),
            country: "India".to_string(),
        }
    }

    fn cart_line(qty: u32) -> CartLine {
        CartLine {
            id: LineItemId::new("li_1"),
            product_id: ProductId::new("p1"),
            handle: "linen-shirt".to_string(),
            title: "Linen Shirt".to_string(),
            image: None,
            size: Some("M".to_string()),
            color: None,
            quantity: qty,
            unit_price: Money::new(149_900, Currency::INR),
        }
    }

    #[test]
    fn test_status_cancel_rules() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Processing.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(OrderStatus::Delivered.is_terminal());
        assert_eq!(OrderStatus::from_str("SHIPPED"), Some(OrderStatus::Shipped));
        assert_eq!(serde_json::to_string(&OrderStatus::Cancelled).unwrap(), r#""cancelled""#);
    }

    #[test]
    fn test_address_one_line() {
        assert_eq!(
            address().one_line(),
            "12 MG Road, Flat 4B, Bengaluru, Karnataka 560001, India"
        );
    }

    #[test]
    fn test_address_validation_collects_fields() {
        let mut a = address();
        a.full_name.clear();
        a.phone = "123".to_string();
        let errors = a.validate().unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(|e| e.field()).collect();
        assert_eq!(fields, vec!["fullName", "phone"]);
    }

    #[test]
    fn test_place_order_from_cart() {
        let mut cart = Cart::new(Currency::INR);
        assert!(PlaceOrder::from_cart(&cart, address(), PaymentMethod::Upi).is_err());

        cart.add(cart_line(2)).unwrap();
        let order = PlaceOrder::from_cart(&cart, address(), PaymentMethod::Upi)
            .unwrap()
            .with_note("  ");
        assert_eq!(order.source, OrderSource::Cart);
        assert_eq!(order.lines[0].quantity, 2);
        assert!(order.note.is_none());
        assert!(order.validate().is_ok());

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["paymentMethod"], "upi");
        assert_eq!(json["shippingAddress"]["postalCode"], "560001");
    }

    #[test]
    fn test_place_order_from_buy_now() {
        let buy = BuyNow::new(cart_line(1), Utc::now()).unwrap();
        let order = PlaceOrder::from_buy_now(&buy, address(), PaymentMethod::CashOnDelivery);
        assert_eq!(order.source, OrderSource::BuyNow);
        assert_eq!(serde_json::to_value(&order).unwrap()["source"], "buy-now");
    }

    #[test]
    fn test_order_cancellable() {
        let order = Order {
            id: OrderId::new("o1"),
            number: "MSN-1".to_string(),
            user_id: None,
            status: OrderStatus::Shipped,
            lines: preview_lines(&[cart_line(3)]),
            shipping_address: address(),
            payment_method: PaymentMethod::Card,
            subtotal: Money::new(449_700, Currency::INR),
            shipping: None,
            total: Money::new(449_700, Currency::INR),
            placed_at: Utc::now(),
        };
        assert_eq!(order.item_count(), 3);
        assert!(matches!(
            order.ensure_cancellable(),
            Err(CommerceError::NotCancellable { .. })
        ));
    }
}
