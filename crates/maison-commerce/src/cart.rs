//! Cart, wishlist and buy-now types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId};
use crate::money::{Currency, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per cart line.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Identity of a purchasable variant: product plus chosen size and colour.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
}

fn check_quantity(quantity: u32) -> Result<(), CommerceError> {
    if quantity == 0 {
        return Err(CommerceError::InvalidQuantity(0));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CommerceError::QuantityExceedsLimit(quantity, MAX_LINE_QUANTITY));
    }
    Ok(())
}

/// A line in the shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: LineItemId,
    pub product_id: ProductId,
    pub handle: String,
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

impl CartLine {
    /// Build a local line for `product`. The id is local until the backend
    /// assigns one.
    pub fn from_product(
        product: &Product,
        size: Option<String>,
        color: Option<String>,
        quantity: u32,
    ) -> Result<Self, CommerceError> {
        check_quantity(quantity)?;
        if !product.available {
            return Err(CommerceError::OutOfStock(product.title.clone()));
        }
        if !product.offers_size(size.as_deref()) {
            return Err(CommerceError::validation("size", "please choose a size"));
        }
        if !product.offers_color(color.as_deref()) {
            return Err(CommerceError::validation("color", "please choose a colour"));
        }
        Ok(Self {
            id: LineItemId::generate(),
            product_id: product.id.clone(),
            handle: product.handle.clone(),
            title: product.title.clone(),
            image: product.featured_image().map(|i| i.url.clone()),
            size,
            color,
            quantity,
            unit_price: product.price,
        })
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CommerceError::Overflow)
    }

    /// "M / Ivory", or empty when the product has no options.
    pub fn variant_label(&self) -> String {
        [self.size.as_deref(), self.color.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Request body for adding a line on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartLine {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
}

impl NewCartLine {
    pub fn validate(&self) -> Result<(), CommerceError> {
        check_quantity(self.quantity)
    }
}

impl From<&CartLine> for NewCartLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            size: line.size.clone(),
            color: line.color.clone(),
            quantity: line.quantity,
        }
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub lines: Vec<CartLine>,
    #[serde(default)]
    pub currency: Currency,
}

impl Cart {
    pub fn new(currency: Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across lines, for the header badge.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn line(&self, id: &LineItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Add a line, merging into an existing line with the same variant.
    /// Returns the id of the line that now holds the quantity.
    pub fn add(&mut self, line: CartLine) -> Result<LineItemId, CommerceError> {
        check_quantity(line.quantity)?;
        if line.unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: line.unit_price.currency.code().to_string(),
            });
        }

        let key = line.key();
        if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == key) {
            let merged = existing
                .quantity
                .checked_add(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            check_quantity(merged)?;
            existing.quantity = merged;
            return Ok(existing.id.clone());
        }

        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Set a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, id: &LineItemId, quantity: u32) -> Result<(), CommerceError> {
        if quantity == 0 {
            return self.remove(id).map(|_| ());
        }
        check_quantity(quantity)?;
        let line = self
            .lines
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, id: &LineItemId) -> Result<CartLine, CommerceError> {
        let pos = self
            .lines
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        Ok(self.lines.remove(pos))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.lines.iter().try_fold(Money::zero(self.currency), |acc, line| {
            let total = line.line_total()?;
            acc.try_add(&total).ok_or(CommerceError::Overflow)
        })
    }
}

/// A saved product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Money,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            handle: product.handle.clone(),
            title: product.title.clone(),
            image: product.featured_image().map(|i| i.url.clone()),
            price: product.price,
            added_at: None,
        }
    }
}

/// Single-product checkout that bypasses the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyNow {
    pub line: CartLine,
    pub created_at: DateTime<Utc>,
}

impl BuyNow {
    pub fn new(line: CartLine, created_at: DateTime<Utc>) -> Result<Self, CommerceError> {
        check_quantity(line.quantity)?;
        Ok(Self { line, created_at })
    }

    pub fn total(&self) -> Result<Money, CommerceError> {
        self.line.line_total()
    }
}
