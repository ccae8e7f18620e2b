//! Server functions. Each one forwards the shopper's cookie to the
//! commerce backend through `maison-services`. Cart and wishlist answers
//! are also recorded per shopper session on the server, and read back
//! when the backend is unreachable.

use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use leptos::server_fn::error::ServerFnError;
use maison_commerce::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
use crate::backend::{relay_cookie, Backend};
#[cfg(feature = "ssr")]
use maison_services as services;

/// How many related products the detail page shows.
pub const RELATED_LIMIT: u32 = 8;
/// How many posts the homepage social grid shows.
pub const SOCIAL_LIMIT: usize = 8;

/// Everything the product page needs in one round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub product: Product,
    pub related: Vec<Product>,
    pub reviews: Vec<Review>,
    pub summary: ReviewSummary,
}

/// Products for one homepage carousel section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProducts {
    pub section: SectionId,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HomeData {
    /// Enabled sections in display order.
    pub sections: Vec<HomeSectionEntry>,
    pub carousels: Vec<SectionProducts>,
    pub testimonials: Vec<Testimonial>,
    pub social: Vec<SocialPost>,
}

impl HomeData {
    pub fn products_for(&self, section: &SectionId) -> Vec<Product> {
        self.carousels
            .iter()
            .find(|c| &c.section == section)
            .map(|c| c.products.clone())
            .unwrap_or_default()
    }
}

// ============================================================================
// Session
// ============================================================================

#[server(prefix = "/api")]
pub async fn current_user() -> Result<Option<User>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::auth::me(&backend.client))
}

#[server(prefix = "/api")]
pub async fn login(email: String, password: String) -> Result<User, ServerFnError> {
    let backend = Backend::from_request()?;
    let session = backend.run(services::auth::login(&backend.client, &Credentials { email, password }))?;
    relay_cookie(session.set_cookie);
    tracing::info!(user_id = %session.user.id, "signed in");
    Ok(session.user)
}

#[server(prefix = "/api")]
pub async fn register(
    name: String,
    email: String,
    phone: Option<String>,
    password: String,
    confirm_password: String,
) -> Result<User, ServerFnError> {
    let backend = Backend::from_request()?;
    let registration = Registration {
        name,
        email,
        phone: phone.filter(|p| !p.trim().is_empty()),
        password,
        confirm_password,
    };
    let session = backend.run(services::auth::register(&backend.client, &registration))?;
    relay_cookie(session.set_cookie);
    Ok(session.user)
}

#[server(prefix = "/api")]
pub async fn logout() -> Result<(), ServerFnError> {
    let backend = Backend::from_request()?;
    let cleared = backend.run(services::auth::logout(&backend.client))?;
    backend.forget();
    relay_cookie(cleared);
    Ok(())
}

#[server(prefix = "/api")]
pub async fn request_password_reset(email: String) -> Result<(), ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::auth::forgot_password(&backend.client, &email))
}

#[server(prefix = "/api")]
pub async fn update_profile(name: String, phone: Option<String>) -> Result<User, ServerFnError> {
    let backend = Backend::from_request()?;
    let update = ProfileUpdate {
        name,
        phone: phone.filter(|p| !p.trim().is_empty()),
    };
    backend.run(services::users::update_profile(&backend.client, &update))
}

// ============================================================================
// Catalog and content
// ============================================================================

#[server(prefix = "/api", input = Json)]
pub async fn list_products(query: ProductQuery) -> Result<Page<Product>, ServerFnError> {
    let backend = Backend::from_request()?;
    let mut query = query;
    if query.per_page == 0 {
        query.per_page = backend.config.products_per_page;
    }
    backend.run(services::products::list(&backend.client, &query))
}

#[server(prefix = "/api")]
pub async fn get_product_detail(handle: String) -> Result<Option<ProductDetail>, ServerFnError> {
    let backend = Backend::from_request()?;
    let Some(product) = backend.run(services::products::by_handle(&backend.client, &handle))? else {
        crate::backend::set_status(leptos_wasi::prelude::StatusCode::NOT_FOUND);
        return Ok(None);
    };
    let related = backend.run_or_default(
        "related products",
        services::products::related(&backend.client, &handle, RELATED_LIMIT),
    );
    let (reviews, summary) =
        backend.run_or_default("reviews", services::reviews::for_product(&backend.client, &product.id));
    Ok(Some(ProductDetail {
        product,
        related,
        reviews,
        summary,
    }))
}

#[server(prefix = "/api")]
pub async fn get_home_data() -> Result<HomeData, ServerFnError> {
    let backend = Backend::from_request()?;
    let entries = backend.run(services::homepage::sections(&backend.client))?;
    let sections: Vec<HomeSectionEntry> =
        maison_commerce::content::visible_sections(&entries).into_iter().cloned().collect();

    let mut data = HomeData::default();
    for entry in &sections {
        match &entry.section {
            HomeSection::ProductCarousel { collection, limit, .. } => {
                let products = backend.run_or_default(
                    "collection carousel",
                    services::products::collection(&backend.client, collection, *limit),
                );
                data.carousels.push(SectionProducts {
                    section: entry.id.clone(),
                    products,
                });
            }
            HomeSection::Testimonials { .. } if data.testimonials.is_empty() => {
                data.testimonials =
                    backend.run_or_default("testimonials", services::testimonials::published(&backend.client));
            }
            HomeSection::SocialFeed { .. } if data.social.is_empty() => {
                data.social = backend.run_or_default(
                    "social feed",
                    services::social::feed(&backend.client, &backend.config, SOCIAL_LIMIT),
                );
            }
            _ => {}
        }
    }
    data.sections = sections;
    Ok(data)
}

#[server(prefix = "/api")]
pub async fn navigation() -> Result<Vec<NavItem>, ServerFnError> {
    let backend = Backend::from_request()?;
    Ok(backend.run_or_default("navigation", services::navbar::get(&backend.client)))
}

#[server(prefix = "/api")]
pub async fn get_legal_page(slug: String) -> Result<Option<LegalPage>, ServerFnError> {
    let backend = Backend::from_request()?;
    let page = backend.run(services::legal::by_slug(&backend.client, &slug))?;
    if page.is_none() {
        crate::backend::set_status(leptos_wasi::prelude::StatusCode::NOT_FOUND);
    }
    Ok(page)
}

#[server(prefix = "/api", input = Json)]
pub async fn submit_inquiry(inquiry: NewInquiry) -> Result<(), ServerFnError> {
    let backend = Backend::from_request()?;
    let inquiry = backend.run(services::inquiries::submit(&backend.client, inquiry))?;
    tracing::info!(inquiry_id = %inquiry.id, "inquiry received");
    Ok(())
}

#[server(prefix = "/api", input = Json)]
pub async fn create_review(review: NewReview) -> Result<Review, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::reviews::create(&backend.client, &review))
}

// ============================================================================
// Cart and wishlist
// ============================================================================

#[server(prefix = "/api")]
pub async fn fetch_cart() -> Result<Cart, ServerFnError> {
    let backend = Backend::from_request()?;
    let cart = backend.run_or_recall(services::cart::fetch(&backend.client), |s| {
        let cart = s.cart.cart();
        (!cart.is_empty()).then_some(cart)
    })?;
    Ok(remember_cart(&backend, cart))
}

#[server(prefix = "/api", input = Json)]
pub async fn add_to_cart(line: NewCartLine) -> Result<Cart, ServerFnError> {
    let backend = Backend::from_request()?;
    let cart = backend.run(services::cart::add_line(&backend.client, &line))?;
    Ok(remember_cart(&backend, cart))
}

#[server(prefix = "/api", input = Json)]
pub async fn update_cart_quantity(line_id: LineItemId, quantity: u32) -> Result<Cart, ServerFnError> {
    let backend = Backend::from_request()?;
    let cart = backend.run(services::cart::update_quantity(&backend.client, &line_id, quantity))?;
    Ok(remember_cart(&backend, cart))
}

#[server(prefix = "/api", input = Json)]
pub async fn remove_cart_line(line_id: LineItemId) -> Result<Cart, ServerFnError> {
    let backend = Backend::from_request()?;
    let cart = backend.run(services::cart::remove_line(&backend.client, &line_id))?;
    Ok(remember_cart(&backend, cart))
}

#[server(prefix = "/api")]
pub async fn clear_cart() -> Result<Cart, ServerFnError> {
    let backend = Backend::from_request()?;
    let cart = backend.run(services::cart::clear(&backend.client))?;
    Ok(remember_cart(&backend, cart))
}

#[server(prefix = "/api")]
pub async fn fetch_wishlist() -> Result<Vec<WishlistItem>, ServerFnError> {
    let backend = Backend::from_request()?;
    let items = backend.run_or_recall(services::wishlist::fetch(&backend.client), |s| {
        (!s.wishlist.is_empty()).then(|| s.wishlist.items())
    })?;
    Ok(remember_wishlist(&backend, items))
}

#[server(prefix = "/api", input = Json)]
pub async fn add_to_wishlist(product_id: ProductId) -> Result<Vec<WishlistItem>, ServerFnError> {
    let backend = Backend::from_request()?;
    let items = backend.run(services::wishlist::add(&backend.client, &product_id))?;
    Ok(remember_wishlist(&backend, items))
}

#[server(prefix = "/api", input = Json)]
pub async fn remove_from_wishlist(product_id: ProductId) -> Result<Vec<WishlistItem>, ServerFnError> {
    let backend = Backend::from_request()?;
    let items = backend.run(services::wishlist::remove(&backend.client, &product_id))?;
    Ok(remember_wishlist(&backend, items))
}

#[cfg(feature = "ssr")]
fn remember_cart(backend: &Backend, cart: Cart) -> Cart {
    backend.remember(|s| s.cart.apply_server(cart.clone(), None));
    cart
}

#[cfg(feature = "ssr")]
fn remember_wishlist(backend: &Backend, items: Vec<WishlistItem>) -> Vec<WishlistItem> {
    backend.remember(|s| s.wishlist.apply_server(items.clone(), None));
    items
}

// ============================================================================
// Orders
// ============================================================================

#[server(prefix = "/api", input = Json)]
pub async fn submit_order(order: PlaceOrder) -> Result<Order, ServerFnError> {
    let backend = Backend::from_request()?;
    let order = backend.run(services::orders::place(&backend.client, &order))?;
    tracing::info!(order_id = %order.id, "order placed");
    Ok(order)
}

#[server(prefix = "/api")]
pub async fn my_orders() -> Result<Vec<Order>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::orders::mine(&backend.client))
}

#[server(prefix = "/api", input = Json)]
pub async fn cancel_order(id: OrderId) -> Result<Order, ServerFnError> {
    let backend = Backend::from_request()?;
    let order = backend.run(services::orders::get(&backend.client, &id))?;
    backend.run(services::orders::cancel(&backend.client, &order))
}

// ============================================================================
// Admin
// ============================================================================

#[server(prefix = "/api", input = Json)]
pub async fn admin_orders(status: Option<OrderStatus>, page: u32) -> Result<Page<Order>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::orders::admin_list(&backend.client, status, page))
}

#[server(prefix = "/api", input = Json)]
pub async fn update_order_status(id: OrderId, status: OrderStatus) -> Result<Order, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::orders::update_status(&backend.client, &id, status))
}

#[server(prefix = "/api")]
pub async fn admin_testimonials() -> Result<Vec<Testimonial>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::testimonials::admin_list(&backend.client))
}

/// Create when `id` is absent, update otherwise.
#[server(prefix = "/api", input = Json)]
pub async fn save_testimonial(
    id: Option<TestimonialId>,
    input: TestimonialInput,
) -> Result<Testimonial, ServerFnError> {
    let backend = Backend::from_request()?;
    match id {
        Some(id) => backend.run(services::testimonials::update(&backend.client, &id, &input)),
        None => backend.run(services::testimonials::create(&backend.client, &input)),
    }
}

#[server(prefix = "/api", input = Json)]
pub async fn delete_testimonial(id: TestimonialId) -> Result<(), ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::testimonials::delete(&backend.client, &id))
}

#[server(prefix = "/api", input = Json)]
pub async fn reorder_testimonials(ids: Vec<TestimonialId>) -> Result<Vec<Testimonial>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::testimonials::reorder(&backend.client, &ids))
}

#[server(prefix = "/api", input = Json)]
pub async fn admin_inquiries(status: Option<InquiryStatus>) -> Result<Vec<Inquiry>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::inquiries::admin_list(&backend.client, status))
}

#[server(prefix = "/api", input = Json)]
pub async fn update_inquiry_status(id: InquiryId, status: InquiryStatus) -> Result<Inquiry, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::inquiries::update_status(&backend.client, &id, status))
}

#[server(prefix = "/api", input = Json)]
pub async fn delete_inquiry(id: InquiryId) -> Result<(), ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::inquiries::delete(&backend.client, &id))
}

#[server(prefix = "/api", input = Json)]
pub async fn admin_users(search: Option<String>, page: u32) -> Result<Page<User>, ServerFnError> {
    let backend = Backend::from_request()?;
    let search = search.filter(|s| !s.trim().is_empty());
    backend.run(services::users::admin_list(&backend.client, search.as_deref(), page))
}

#[server(prefix = "/api", input = Json)]
pub async fn update_user_role(id: UserId, role: Role) -> Result<User, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::users::update_role(&backend.client, &id, role))
}

#[server(prefix = "/api", input = Json)]
pub async fn delete_user(id: UserId) -> Result<(), ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::users::delete(&backend.client, &id))
}

#[server(prefix = "/api", input = Json)]
pub async fn save_navigation(items: Vec<NavItem>) -> Result<Vec<NavItem>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::navbar::save(&backend.client, &items))
}

#[server(prefix = "/api")]
pub async fn admin_sections() -> Result<Vec<HomeSectionEntry>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::homepage::sections(&backend.client))
}

#[server(prefix = "/api", input = Json)]
pub async fn update_section(
    id: SectionId,
    section: HomeSection,
    enabled: bool,
) -> Result<HomeSectionEntry, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::homepage::update_section(&backend.client, &id, &section, enabled))
}

#[server(prefix = "/api")]
pub async fn legal_pages() -> Result<Vec<LegalPage>, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::legal::list(&backend.client))
}

#[server(prefix = "/api", input = Json)]
pub async fn save_legal_page(input: LegalPageInput) -> Result<LegalPage, ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::legal::upsert(&backend.client, &input))
}

#[server(prefix = "/api", input = Json)]
pub async fn delete_review(id: ReviewId) -> Result<(), ServerFnError> {
    let backend = Backend::from_request()?;
    backend.run(services::reviews::delete(&backend.client, &id))
}
