//! Checkout for the bag, or for a single buy-now item
//! (`/checkout?mode=buy-now`).

use super::SignInPrompt;
use crate::api::submit_order;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::{use_navigate, use_query_map};
use maison_commerce::order::preview_lines;
use maison_commerce::prelude::*;

const PAYMENT_METHODS: [PaymentMethod; 3] = [PaymentMethod::CashOnDelivery, PaymentMethod::Upi, PaymentMethod::Card];

/// Lines being bought and their total.
fn summary_lines(lines: &[CartLine]) -> (Vec<OrderLine>, Option<Money>) {
    let preview = preview_lines(lines);
    let currency = lines.first().map(|l| l.unit_price.currency).unwrap_or_default();
    let totals: Option<Vec<Money>> = preview.iter().map(OrderLine::line_total).collect();
    let total = totals.and_then(|t| Money::try_sum(t.iter(), currency));
    (preview, total)
}

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let shop = use_shop();
    let query = use_query_map();
    let buy_now_mode = move || query.with(|q| q.get_str("mode") == Some("buy-now"));
    let signed_in = move || shop.store.with(|s| s.auth.is_authenticated());

    let lines = Memo::new(move |_| {
        shop.store.with(|s| {
            if buy_now_mode() {
                s.buy_now.get().map(|b| vec![b.line.clone()]).unwrap_or_default()
            } else {
                s.cart.cart().lines
            }
        })
    });

    view! {
        <Title text="Checkout"/>
        <h1>"Checkout"</h1>
        <Show
            when=signed_in
            fallback=|| view! { <SignInPrompt reason="Sign in to place your order."/> }
        >
            <Show
                when=move || !lines.with(Vec::is_empty)
                fallback=|| view! {
                    <div class="empty-state">
                        <p>"There is nothing to check out."</p>
                        <a href="/products" class="btn">"Continue shopping"</a>
                    </div>
                }
            >
                <div class="checkout">
                    <CheckoutForm buy_now=Signal::derive(buy_now_mode)/>
                    <aside class="order-summary">
                        <h2>"Order summary"</h2>
                        {move || {
                            let (preview, total) = lines.with(|l| summary_lines(l));
                            view! {
                                <ul>
                                    {preview.into_iter().map(|line| {
                                        let total = line.line_total().map(|m| m.display()).unwrap_or_default();
                                        view! {
                                            <li>
                                                <span>{format!("{} \u{d7} {}", line.title, line.quantity)}</span>
                                                <span>{total}</span>
                                            </li>
                                        }
                                    }).collect_view()}
                                </ul>
                                <p class="order-total">
                                    <span>"Total"</span>
                                    <strong>{total.map(|m| m.display()).unwrap_or_default()}</strong>
                                </p>
                            }
                        }}
                    </aside>
                </div>
            </Show>
        </Show>
    }
}

#[component]
fn CheckoutForm(#[prop(into)] buy_now: Signal<bool>) -> impl IntoView {
    let shop = use_shop();
    let navigate = use_navigate();
    let address = RwSignal::new(ShippingAddress {
        country: "India".to_string(),
        ..Default::default()
    });
    let payment = RwSignal::new(PaymentMethod::default());
    let note = RwSignal::new(String::new());
    let pending = RwSignal::new(false);

    let field = move |label: &'static str, get: fn(&ShippingAddress) -> String, set: fn(&mut ShippingAddress, String)| {
        view! {
            <label>
                {label}
                <input
                    type="text"
                    prop:value=move || address.with(get)
                    on:input=move |ev| address.update(|a| set(a, event_target_value(&ev)))
                />
            </label>
        }
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let buy_now = buy_now.get_untracked();
        let shipping = address.get_untracked();
        let method = payment.get_untracked();
        let order = shop.store.with_untracked(|s| {
            if buy_now {
                s.buy_now
                    .get()
                    .map(|b| PlaceOrder::from_buy_now(b, shipping, method))
                    .ok_or_else(|| CommerceError::validation("buyNow", "this checkout has expired"))
            } else {
                PlaceOrder::from_cart(&s.cart.cart(), shipping, method)
            }
        });
        let order = match order {
            Ok(order) => order.with_note(note.get_untracked()),
            Err(e) => {
                shop.toasts.error(e.to_string());
                return;
            }
        };
        if let Err(errors) = order.validate() {
            for e in errors {
                shop.toasts.error(e.to_string());
            }
            return;
        }

        pending.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match submit_order(order).await {
                Ok(placed) => {
                    if buy_now {
                        shop.edit(|s| s.buy_now.clear());
                    } else {
                        shop.refresh_cart();
                    }
                    shop.toasts.success(format!("Order {} placed. Thank you!", placed.number));
                    navigate("/orders", Default::default());
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            pending.set(false);
        });
    };

    view! {
        <form class="checkout-form" on:submit=submit>
            <h2>"Delivery address"</h2>
            {field("Full name", |a| a.full_name.clone(), |a, v| a.full_name = v)}
            {field("Phone", |a| a.phone.clone(), |a, v| a.phone = v)}
            {field("Address line 1", |a| a.line1.clone(), |a, v| a.line1 = v)}
            {field("Address line 2", |a| a.line2.clone().unwrap_or_default(), |a, v| {
                a.line2 = (!v.trim().is_empty()).then_some(v)
            })}
            {field("City", |a| a.city.clone(), |a, v| a.city = v)}
            {field("State", |a| a.state.clone(), |a, v| a.state = v)}
            {field("PIN code", |a| a.postal_code.clone(), |a, v| a.postal_code = v)}

            <h2>"Payment"</h2>
            {PAYMENT_METHODS.into_iter().map(|method| view! {
                <label class="radio">
                    <input
                        type="radio"
                        name="payment"
                        prop:checked=move || payment.get() == method
                        on:change=move |_| payment.set(method)
                    />
                    {method.display_name()}
                </label>
            }).collect_view()}

            <label>
                "Order note"
                <textarea prop:value=note on:input=move |ev| note.set(event_target_value(&ev))></textarea>
            </label>

            <button class="btn" type="submit" disabled=pending>
                {move || if pending.get() { "Placing order..." } else { "Place order" }}
            </button>
        </form>
    }
}
