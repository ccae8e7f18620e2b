//! Product detail: gallery, variant picker, add to bag / buy now, reviews
//! and related products.

use super::home::ProductCarousel;
use super::LoadError;
use crate::api::{create_review, get_product_detail, ProductDetail};
use crate::state::{error_message, use_shop, Shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Meta, Title};
use leptos_router::hooks::{use_navigate, use_params_map};
use maison_commerce::prelude::*;
use maison_commerce::review::MIN_REVIEW_BODY;
use maison_ui::components::RatingStars;

#[component]
pub fn ProductPage() -> impl IntoView {
    let params = use_params_map();
    let handle = move || params.with(|p| p.get("handle").unwrap_or_default());
    let detail = Resource::new(handle, get_product_detail);

    view! {
        <Suspense fallback=|| view! { <ProductDetailSkeleton/> }>
            {move || detail.get().map(|result| match result {
                Ok(Some(detail)) => view! { <ProductView detail=detail/> }.into_any(),
                Ok(None) => view! {
                    <Title text="Product not found"/>
                    <div class="not-found">
                        <p>"This product is no longer available."</p>
                        <a href="/products" class="btn">"Back to products"</a>
                    </div>
                }.into_any(),
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn ProductView(detail: ProductDetail) -> impl IntoView {
    let shop = use_shop();
    let navigate = use_navigate();
    let ProductDetail {
        product,
        related,
        reviews,
        summary,
    } = detail;

    let size = RwSignal::new(None::<String>);
    let color = RwSignal::new((product.colors.len() == 1).then(|| product.colors[0].clone()));
    let quantity = RwSignal::new(1u32);
    let image = RwSignal::new(0usize);
    let product = StoredValue::new(product);

    let build_line = move || {
        product.with_value(|p| CartLine::from_product(p, size.get_untracked(), color.get_untracked(), quantity.get_untracked()))
    };
    let add = move |_| match build_line() {
        Ok(line) => shop.add_to_bag(line),
        Err(e) => shop.toasts.error(e.to_string()),
    };
    let buy_now = move |_| match build_line() {
        Ok(line) => {
            if shop.start_buy_now(line) {
                navigate("/checkout?mode=buy-now", Default::default());
            }
        }
        Err(e) => shop.toasts.error(e.to_string()),
    };

    let p = product.get_value();
    let wishlisted = {
        let id = p.id.clone();
        move || shop.store.with(|s| s.wishlist.contains(&id))
    };
    let images = StoredValue::new(p.images.clone());
    let main_image = move || {
        images.with_value(|imgs| imgs.get(image.get()).map(|i| (i.url.clone(), i.alt.clone().unwrap_or_default())))
    };
    let description = p.description.clone();
    let price = p.price.display();
    let compare_at = p.compare_at_price.filter(|_| p.is_on_sale()).map(|m| m.display());
    let discount = p.discount_percent();

    view! {
        <Title text=p.title.clone()/>
        <Meta name="description" content=description.chars().take(160).collect::<String>()/>
        <article class="product-detail">
            <div class="gallery">
                {move || main_image().map(|(src, alt)| view! { <img class="gallery-main" src=src alt=alt/> })}
                <div class="gallery-thumbs">
                    {images.get_value().into_iter().enumerate().map(|(i, img)| view! {
                        <button
                            class="thumb"
                            class:active=move || image.get() == i
                            on:click=move |_| image.set(i)
                        >
                            <img src=img.url alt="" loading="lazy"/>
                        </button>
                    }).collect_view()}
                </div>
            </div>

            <div class="product-info">
                <h1>{p.title.clone()}</h1>
                {p.average_rating.map(|r| view! { <RatingStars rating=r count=summary.count/> })}
                <p class="price">
                    <span>{price}</span>
                    {compare_at.map(|c| view! { <s class="compare-at">{c}</s> })}
                    {discount.map(|d| view! { <span class="badge-sale">{format!("{d}% off")}</span> })}
                </p>

                <OptionPicker label="Size" options=p.sizes.clone() selected=size/>
                <OptionPicker label="Colour" options=p.colors.clone() selected=color/>

                <div class="quantity">
                    <button on:click=move |_| quantity.update(|q| *q = q.saturating_sub(1).max(1))>"\u{2212}"</button>
                    <span>{quantity}</span>
                    <button on:click=move |_| quantity.update(|q| *q = (*q + 1).min(MAX_LINE_QUANTITY))>"+"</button>
                </div>

                {if p.available {
                    view! {
                        <div class="buy-actions">
                            <button class="btn" on:click=add>"Add to bag"</button>
                            <button class="btn-outline" on:click=buy_now>"Buy now"</button>
                        </div>
                    }.into_any()
                } else {
                    view! { <p class="sold-out">"Sold out"</p> }.into_any()
                }}
                <button
                    class="wishlist-toggle"
                    class:active=wishlisted.clone()
                    on:click=move |_| shop.toggle_wishlist(product.get_value())
                >
                    {move || if wishlisted() { "\u{2665} Saved" } else { "\u{2661} Save to wishlist" }}
                </button>

                <div class="description">{description}</div>
            </div>
        </article>

        <Reviews product_id=p.id.clone() initial=reviews summary=summary shop=shop/>

        {(!related.is_empty()).then(|| view! {
            <section class="related">
                <h2>"You may also like"</h2>
                <ProductCarousel products=related label="Related products"/>
            </section>
        })}
    }
}

#[component]
fn OptionPicker(
    #[prop(into)] label: String,
    options: Vec<String>,
    selected: RwSignal<Option<String>>,
) -> impl IntoView {
    (!options.is_empty()).then(|| {
        view! {
            <fieldset class="option-picker">
                <legend>{label}</legend>
                {options.into_iter().map(|option| {
                    let value = option.clone();
                    let is_selected = move || selected.with(|s| s.as_deref() == Some(value.as_str()));
                    let pick = option.clone();
                    view! {
                        <button
                            class="option"
                            class:selected=is_selected
                            on:click=move |_| selected.set(Some(pick.clone()))
                        >
                            {option}
                        </button>
                    }
                }).collect_view()}
            </fieldset>
        }
    })
}

#[component]
fn Reviews(product_id: ProductId, initial: Vec<Review>, summary: ReviewSummary, shop: Shop) -> impl IntoView {
    let reviews = RwSignal::new(initial);
    let summary = RwSignal::new(summary);
    let signed_in = move || shop.store.with(|s| s.auth.is_authenticated());

    let on_created = Callback::new(move |review: Review| {
        reviews.update(|r| r.insert(0, review));
        summary.set(reviews.with_untracked(|r| ReviewSummary::from_reviews(r)));
    });

    view! {
        <section class="reviews">
            <h2>"Reviews"</h2>
            {move || summary.with(|s| {
                if s.count == 0 {
                    return view! { <p>"No reviews yet."</p> }.into_any();
                }
                view! {
                    <div class="review-summary">
                        <RatingStars rating=s.rounded_average() count=s.count/>
                        <ul class="histogram">
                            {(1..=5u8).rev().map(|stars| {
                                let percent = s.percent(stars);
                                view! {
                                    <li>
                                        <span>{format!("{stars}\u{2605}")}</span>
                                        <span class="bar"><span style=format!("width: {percent}%")></span></span>
                                        <span>{format!("{percent}%")}</span>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    </div>
                }.into_any()
            })}

            <Show
                when=signed_in
                fallback=|| view! { <p><a href="/login">"Sign in"</a>" to write a review."</p> }
            >
                <ReviewForm product_id=product_id.clone() on_created=on_created shop=shop/>
            </Show>

            <For
                each=move || reviews.get()
                key=|r| r.id.clone()
                let:review
            >
                <article class="review">
                    <RatingStars rating=f32::from(review.rating)/>
                    {review.title.clone().map(|t| view! { <h3>{t}</h3> })}
                    <p>{review.body.clone()}</p>
                    <footer>
                        <span>{review.author_name.clone()}</span>
                        {review.verified_purchase.then(|| view! { <span class="verified">"Verified purchase"</span> })}
                        <time>{review.created_at.format("%d %b %Y").to_string()}</time>
                    </footer>
                </article>
            </For>
        </section>
    }
}

#[component]
fn ReviewForm(product_id: ProductId, on_created: Callback<Review>, shop: Shop) -> impl IntoView {
    let rating = RwSignal::new(5u8);
    let title = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let product_id = StoredValue::new(product_id);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let review = NewReview {
            product_id: product_id.get_value(),
            rating: rating.get_untracked(),
            title: Some(title.get_untracked()).filter(|t| !t.trim().is_empty()),
            body: body.get_untracked(),
        };
        if let Err(errors) = review.validate() {
            for e in errors {
                shop.toasts.error(e.to_string());
            }
            return;
        }
        pending.set(true);
        spawn_local(async move {
            match create_review(review).await {
                Ok(created) => {
                    title.set(String::new());
                    body.set(String::new());
                    on_created.run(created);
                    shop.toasts.success("Thanks for your review");
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            pending.set(false);
        });
    };

    view! {
        <form class="review-form" on:submit=submit>
            <label>
                "Rating"
                <select on:change=move |ev| {
                    if let Ok(r) = event_target_value(&ev).parse() {
                        rating.set(r);
                    }
                }>
                    {(1..=5u8).rev().map(|r| view! {
                        <option value=r.to_string() selected=move || rating.get() == r>{format!("{r} stars")}</option>
                    }).collect_view()}
                </select>
            </label>
            <label>
                "Title"
                <input
                    type="text"
                    maxlength="120"
                    prop:value=title
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Review"
                <textarea
                    minlength=MIN_REVIEW_BODY.to_string()
                    prop:value=body
                    on:input=move |ev| body.set(event_target_value(&ev))
                ></textarea>
            </label>
            <button class="btn" type="submit" disabled=pending>
                {move || if pending.get() { "Posting..." } else { "Post review" }}
            </button>
        </form>
    }
}

#[component]
fn ProductDetailSkeleton() -> impl IntoView {
    view! {
        <div class="product-detail" aria-hidden="true">
            <div class="skeleton" style="aspect-ratio: 3 / 4; border-radius: 8px;"></div>
            <div>
                <div class="skeleton" style="width: 60%; height: 2rem; margin-bottom: 1rem;"></div>
                <div class="skeleton" style="width: 30%; height: 2rem; margin-bottom: 2rem;"></div>
                <div class="skeleton" style="width: 100%; height: 4rem; margin-bottom: 1rem;"></div>
                <div class="skeleton" style="width: 150px; height: 3rem;"></div>
            </div>
        </div>
    }
}
