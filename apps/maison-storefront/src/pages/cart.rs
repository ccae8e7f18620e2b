//! The shopping bag, rendered from the optimistic cart.

use crate::state::use_shop;
use leptos::prelude::*;
use leptos_meta::Title;
use maison_commerce::prelude::*;

#[component]
pub fn CartPage() -> impl IntoView {
    let shop = use_shop();
    let cart = Memo::new(move |_| shop.store.with(|s| s.cart.cart()));
    let syncing = move || shop.store.with(|s| s.cart.is_syncing());
    let subtotal = move || {
        cart.with(|c| c.subtotal())
            .map(|m| m.display())
            .unwrap_or_else(|e| e.to_string())
    };

    view! {
        <Title text="Your bag"/>
        <h1>"Your bag"</h1>
        <Show
            when=move || !cart.with(Cart::is_empty)
            fallback=|| view! {
                <div class="empty-state">
                    <p>"Your bag is empty."</p>
                    <a href="/products" class="btn">"Continue shopping"</a>
                </div>
            }
        >
            <div class="cart">
                <ul class="cart-lines">
                    <For
                        each=move || cart.with(|c| c.lines.clone())
                        key=|line| (line.id.clone(), line.quantity)
                        let:line
                    >
                        <CartLineRow line=line/>
                    </For>
                </ul>
                <aside class="cart-summary">
                    <p>
                        <span>{move || format!("Subtotal ({} items)", cart.with(Cart::item_count))}</span>
                        <strong>{subtotal}</strong>
                    </p>
                    <p class="muted">"Shipping calculated at checkout."</p>
                    <a href="/checkout" class="btn" class:disabled=syncing>"Checkout"</a>
                    <button class="link" on:click=move |_| shop.clear_bag()>"Empty bag"</button>
                </aside>
            </div>
        </Show>
    }
}

#[component]
fn CartLineRow(line: CartLine) -> impl IntoView {
    let shop = use_shop();
    let id = line.id.clone();
    // Lines not yet confirmed have no backend id to address.
    let pending = id.is_local();
    let quantity = line.quantity;
    let total = line.line_total().map(|m| m.display()).unwrap_or_default();
    let variant = line.variant_label();

    let (dec_id, inc_id, remove_id) = (id.clone(), id.clone(), id);

    view! {
        <li class="cart-line" class:pending=pending>
            {line.image.map(|src| view! { <img src=src alt=line.title.clone() loading="lazy"/> })}
            <div class="cart-line-info">
                <a href=format!("/products/{}", line.handle)>{line.title.clone()}</a>
                {(!variant.is_empty()).then(|| view! { <p class="muted">{variant}</p> })}
                <p>{line.unit_price.display()}</p>
            </div>
            <div class="quantity">
                <button
                    disabled=pending
                    aria-label="Decrease quantity"
                    on:click=move |_| shop.set_quantity(dec_id.clone(), quantity - 1)
                >
                    "\u{2212}"
                </button>
                <span>{quantity}</span>
                <button
                    disabled=pending || quantity >= MAX_LINE_QUANTITY
                    aria-label="Increase quantity"
                    on:click=move |_| shop.set_quantity(inc_id.clone(), quantity + 1)
                >
                    "+"
                </button>
            </div>
            <strong>{total}</strong>
            <button class="link" disabled=pending on:click=move |_| shop.remove_line(remove_id.clone())>
                "Remove"
            </button>
        </li>
    }
}
