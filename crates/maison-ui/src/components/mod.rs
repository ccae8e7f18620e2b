//! Storefront building blocks.

mod filter_sheet;
mod modal;
mod pagination;
mod product_card;
mod rating;
mod testimonial_card;

pub use filter_sheet::FilterSheet;
pub use modal::Modal;
pub use pagination::Pagination;
pub use product_card::{ProductCard, ProductCardSkeleton, ProductGridSkeleton};
pub use rating::{stars, RatingStars, StarFill};
pub use testimonial_card::TestimonialCard;
