//! Storefront domain types for the Maison fashion shop.
//!
//! These are the shapes exchanged with the commerce backend plus the rules
//! the storefront enforces before it ever sends a request:
//!
//! - **Catalog**: products, listing queries, paged results
//! - **Cart**: cart lines, wishlist items, buy-now checkout
//! - **Orders**: orders, statuses, checkout requests
//! - **Content**: navigation, homepage sections, legal pages, sitemap
//! - **Community**: reviews, testimonials, inquiries, social posts
//! - **Accounts**: users, roles, login and registration forms
//!
//! # Example
//!
//! ```rust,ignore
//! use maison_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::INR);
//! let line = CartLine::from_product(&product, Some("M".into()), None, 1)?;
//! cart.add(line)?;
//!
//! println!("Subtotal: {}", cart.subtotal()?.display());
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod validate;

pub mod cart;
pub mod catalog;
pub mod content;
pub mod inquiry;
pub mod order;
pub mod review;
pub mod social;
pub mod testimonial;
pub mod user;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Page, Product, ProductImage, ProductQuery, SortOption};

    // Cart
    pub use crate::cart::{BuyNow, Cart, CartLine, LineKey, NewCartLine, WishlistItem, MAX_LINE_QUANTITY};

    // Orders
    pub use crate::order::{
        Order, OrderLine, OrderSource, OrderStatus, PaymentMethod, PlaceOrder, ShippingAddress,
        StatusUpdate,
    };

    // Content
    pub use crate::content::{
        ChangeFreq, HomeSection, HomeSectionEntry, LegalPage, LegalPageInput, NavItem,
        SitemapEntry,
    };

    // Community
    pub use crate::inquiry::{Inquiry, InquiryStatus, NewInquiry};
    pub use crate::review::{NewReview, Review, ReviewSummary};
    pub use crate::social::{MediaType, SocialPost};
    pub use crate::testimonial::{Reorder, Testimonial, TestimonialInput};

    // Accounts
    pub use crate::user::{
        Credentials, ForgotPassword, ProfileUpdate, Registration, ResetPassword, Role, User,
    };
}
