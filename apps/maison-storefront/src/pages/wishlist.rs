//! Saved products.

use super::SignInPrompt;
use crate::state::use_shop;
use leptos::prelude::*;
use leptos_meta::Title;
use maison_commerce::prelude::*;

#[component]
pub fn WishlistPage() -> impl IntoView {
    let shop = use_shop();
    let signed_in = move || shop.store.with(|s| s.auth.is_authenticated());
    let items = move || shop.store.with(|s| s.wishlist.items());

    view! {
        <Title text="Wishlist"/>
        <h1>"Wishlist"</h1>
        <Show
            when=signed_in
            fallback=|| view! { <SignInPrompt reason="Sign in to see the pieces you've saved."/> }
        >
            <Show
                when=move || !items().is_empty()
                fallback=|| view! {
                    <div class="empty-state">
                        <p>"Nothing saved yet. Tap the heart on any product to keep it here."</p>
                        <a href="/products" class="btn">"Browse products"</a>
                    </div>
                }
            >
                <div class="products">
                    <For each=items key=|item| item.product_id.clone() let:item>
                        <WishlistCard item=item/>
                    </For>
                </div>
            </Show>
        </Show>
    }
}

#[component]
fn WishlistCard(item: WishlistItem) -> impl IntoView {
    let shop = use_shop();
    let href = format!("/products/{}", item.handle);
    let product_id = item.product_id.clone();

    view! {
        <div class="product-card">
            <a href=href.clone()>
                {item.image.map(|src| view! { <img src=src alt=item.title.clone() loading="lazy"/> })}
            </a>
            <div class="product-card-info">
                <a href=href.clone()><h3>{item.title.clone()}</h3></a>
                <p class="price">{item.price.display()}</p>
                <div class="card-actions">
                    <a href=href class="btn">"Choose size"</a>
                    <button class="link" on:click=move |_| shop.remove_from_wishlist(product_id.clone())>
                        "Remove"
                    </button>
                </div>
            </div>
        </div>
    }
}
