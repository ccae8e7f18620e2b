//! Homepage: CMS sections in admin-defined order.

use super::LoadError;
use crate::api::{get_home_data, HomeData};
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos_meta::Title;
use maison_commerce::content::{HomeSection, HomeSectionEntry};
use maison_commerce::prelude::*;
use maison_ui::components::{ProductCard, ProductGridSkeleton, TestimonialCard};
use maison_ui::{CardsPerView, Carousel};

/// How many characters of a social caption fit under a tile.
const CAPTION_LENGTH: usize = 90;

#[component]
pub fn HomePage() -> impl IntoView {
    let data = Resource::new(|| (), |_| get_home_data());

    view! {
        <Title text=""/>
        <Suspense fallback=|| view! { <ProductGridSkeleton count=4/> }>
            {move || data.get().map(|result| match result {
                Ok(data) => {
                    let data = StoredValue::new(data);
                    data.with_value(|d| d.sections.clone())
                        .into_iter()
                        .map(|entry| view! { <Section entry=entry data=data/> })
                        .collect_view()
                        .into_any()
                }
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn Section(entry: HomeSectionEntry, data: StoredValue<HomeData>) -> impl IntoView {
    match entry.section {
        HomeSection::Hero {
            headline,
            subheadline,
            image_url,
            cta_text,
            cta_url,
        } => {
            let style = image_url.map(|url| format!("background-image: url('{url}')"));
            view! {
                <section class="hero" style=style>
                    <h1>{headline}</h1>
                    {subheadline.map(|s| view! { <p>{s}</p> })}
                    <a href=cta_url class="btn">{cta_text}</a>
                </section>
            }
            .into_any()
        }
        HomeSection::ProductCarousel { title, .. } => {
            let products = data.with_value(|d| d.products_for(&entry.id));
            view! {
                <section class="home-carousel">
                    <h2>{title.clone()}</h2>
                    <ProductCarousel products=products label=title/>
                </section>
            }
            .into_any()
        }
        HomeSection::Banner { image_url, title, link } => {
            let alt = title.clone().unwrap_or_default();
            let image = view! { <img src=image_url alt=alt loading="lazy"/> };
            view! {
                <section class="banner">
                    {match link {
                        Some(href) => view! { <a href=href>{image}</a> }.into_any(),
                        None => image.into_any(),
                    }}
                    {title.map(|t| view! { <h2>{t}</h2> })}
                </section>
            }
            .into_any()
        }
        HomeSection::Testimonials { title } => {
            let testimonials = data.with_value(|d| d.testimonials.clone());
            (!testimonials.is_empty())
                .then(|| {
                    view! {
                        <section class="home-testimonials">
                            <h2>{title.clone()}</h2>
                            <Carousel
                                items=testimonials
                                render=|t: Testimonial| view! { <TestimonialCard testimonial=t/> }
                                cards_per_view=CardsPerView::responsive(1, 2, 3)
                                interval=6000
                                label=title
                            />
                        </section>
                    }
                })
                .into_any()
        }
        HomeSection::SocialFeed { title, handle } => {
            let posts = data.with_value(|d| d.social.clone());
            (!posts.is_empty())
                .then(|| {
                    view! {
                        <section class="social-feed">
                            <h2>{title}</h2>
                            {handle.map(|h| view! { <p class="social-handle">{format!("@{h}")}</p> })}
                            <div class="social-grid">
                                {posts.into_iter().map(|post| view! { <SocialTile post=post/> }).collect_view()}
                            </div>
                        </section>
                    }
                })
                .into_any()
        }
    }
}

/// Products in a carousel, wired to the wishlist.
#[component]
pub fn ProductCarousel(products: Vec<Product>, #[prop(into)] label: String) -> impl IntoView {
    let shop = use_shop();
    let render = move |product: Product| {
        let id = product.id.clone();
        let wishlisted = Signal::derive(move || shop.store.with(|s| s.wishlist.contains(&id)));
        view! {
            <ProductCard
                product=product
                wishlisted=wishlisted
                on_wishlist=Callback::new(move |p: Product| shop.toggle_wishlist(p))
            />
        }
    };

    view! {
        <Carousel
            items=products
            render=render
            cards_per_view=CardsPerView::responsive(2, 3, 4)
            max_card_width=320.0
            label=label
        />
    }
}

#[component]
fn SocialTile(post: SocialPost) -> impl IntoView {
    let caption = post.short_caption(CAPTION_LENGTH);
    let alt = caption.clone().unwrap_or_else(|| "Instagram post".to_string());
    let is_video = post.media_type == MediaType::Video;

    view! {
        <a class="social-tile" href=post.permalink.clone() target="_blank" rel="noopener">
            <img src=post.display_url().to_string() alt=alt loading="lazy"/>
            {is_video.then(|| view! { <span class="social-video" aria-label="Video">"▶"</span> })}
            {caption.map(|c| view! { <p>{c}</p> })}
        </a>
    }
}
