//! # Maison UI
//!
//! Leptos components shared by the Maison storefront pages, and the
//! headless models behind the interactive ones.
//!
//! - [`carousel`]: responsive windowed carousel with autoplay
//! - [`reorder`]: drag-and-drop ordering for admin lists
//! - [`toast`]: transient notifications
//! - [`components`]: product cards, modal, filters, ratings, pagination

pub mod carousel;
pub mod components;
pub mod reorder;
pub mod toast;

pub use carousel::{Breakpoints, CardsPerView, Carousel, Pager, PagerOptions};
pub use reorder::{Positioned, ReorderList};
pub use toast::{use_toasts, Toaster, Toasts};

/// Prelude for common imports
pub mod prelude {
    pub use crate::carousel::{CardsPerView, Carousel};
    pub use crate::components::*;
    pub use crate::reorder::ReorderList;
    pub use crate::toast::{use_toasts, Toaster, Toasts};
}
