use super::rating::RatingStars;
use leptos::prelude::*;
use maison_commerce::catalog::Product;

/// Grid tile for a product: image (second image on hover), title, price,
/// sale badge and a wishlist heart.
#[component]
pub fn ProductCard(
    product: Product,
    #[prop(into, default = Signal::stored(false))] wishlisted: Signal<bool>,
    #[prop(optional)] on_wishlist: Option<Callback<Product>>,
) -> impl IntoView {
    let href = product.url();
    let image = product
        .featured_image()
        .map(|img| (img.url.clone(), img.alt.clone().unwrap_or_else(|| product.title.clone())));
    let hover = product.hover_image().cloned();
    let price = product.price.display();
    let compare_at = product
        .compare_at_price
        .filter(|_| product.is_on_sale())
        .map(|m| m.display());
    let discount = product.discount_percent();
    let rating = product.average_rating;
    let sold_out = !product.available;
    let title = product.title.clone();

    view! {
        <article class="product-card" class:sold-out=sold_out>
            <a href=href.clone() class="product-card-media">
                {image.map(|(src, alt)| view! {
                    <img class="product-card-image" src=src alt=alt loading="lazy"/>
                })}
                {hover.map(|img| view! {
                    <img class="product-card-image-hover" src=img.url alt="" aria-hidden="true" loading="lazy"/>
                })}
                {discount.map(|pct| view! { <span class="badge badge-sale">{format!("-{pct}%")}</span> })}
                {sold_out.then(|| view! { <span class="badge badge-sold-out">"Sold out"</span> })}
            </a>
            {on_wishlist.map(|cb| {
                let product = product.clone();
                view! {
                    <button
                        class="wishlist-toggle"
                        class:active=move || wishlisted.get()
                        aria-pressed=move || wishlisted.get().to_string()
                        aria-label="Save to wishlist"
                        on:click=move |_| cb.run(product.clone())
                    >
                        "♥"
                    </button>
                }
            })}
            <div class="product-card-info">
                <a href=href><h3 class="product-card-title">{title}</h3></a>
                <p class="price">
                    <span class="price-current">{price}</span>
                    {compare_at.map(|c| view! { <s class="price-compare">{c}</s> })}
                </p>
                {rating.map(|r| view! { <RatingStars rating=r/> })}
            </div>
        </article>
    }
}

/// Placeholder with the card's shape while products load.
#[component]
pub fn ProductCardSkeleton() -> impl IntoView {
    view! {
        <div class="product-card" aria-hidden="true">
            <div class="skeleton" style="width: 100%; aspect-ratio: 3 / 4;"></div>
            <div class="product-card-info">
                <div class="skeleton" style="width: 80%; height: 1.25rem; margin-bottom: 0.5rem;"></div>
                <div class="skeleton" style="width: 40%; height: 1rem;"></div>
            </div>
        </div>
    }
}

/// A grid of `count` skeleton cards.
#[component]
pub fn ProductGridSkeleton(#[prop(default = 8)] count: usize) -> impl IntoView {
    view! {
        <div class="products">
            {(0..count).map(|_| view! { <ProductCardSkeleton/> }).collect_view()}
        </div>
    }
}
