//! Responsive windowed carousel.
//!
//! [`breakpoint`] turns viewport width into a cards-per-page count,
//! [`pager`] holds the window and autoplay state, and [`Carousel`] renders
//! them.

pub mod breakpoint;
pub mod component;
pub mod pager;

pub use breakpoint::{Breakpoints, CardsPerView};
pub use component::Carousel;
pub use pager::{ItemWidth, Pager, PagerOptions};
