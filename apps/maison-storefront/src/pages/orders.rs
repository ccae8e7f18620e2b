//! The signed-in shopper's orders.

use super::{LoadError, SignInPrompt};
use crate::api::{cancel_order, my_orders, update_profile};
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use maison_commerce::prelude::*;

#[component]
pub fn OrdersPage() -> impl IntoView {
    let shop = use_shop();
    let signed_in = move || shop.store.with(|s| s.auth.is_authenticated());

    view! {
        <Title text="My orders"/>
        <Show
            when=signed_in
            fallback=|| view! { <SignInPrompt reason="Sign in to see your orders."/> }
        >
            <ProfileForm/>
            <OrderHistory/>
        </Show>
    }
}

#[component]
fn OrderHistory() -> impl IntoView {
    let orders = Resource::new(|| (), |_| my_orders());

    view! {
        <h1>"My orders"</h1>
        <Suspense fallback=|| view! { <p>"Loading orders..."</p> }>
            {move || orders.get().map(|result| match result {
                Ok(list) if list.is_empty() => view! {
                    <div class="empty-state">
                        <p>"You haven't placed any orders yet."</p>
                        <a href="/products" class="btn">"Start shopping"</a>
                    </div>
                }.into_any(),
                Ok(list) => {
                    let list = RwSignal::new(list);
                    view! {
                        <For each=move || list.get() key=|o| (o.id.clone(), o.status) let:order>
                            <OrderCard order=order on_updated=Callback::new(move |updated: Order| {
                                list.update(|l| {
                                    if let Some(o) = l.iter_mut().find(|o| o.id == updated.id) {
                                        *o = updated;
                                    }
                                });
                            })/>
                        </For>
                    }.into_any()
                }
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn OrderCard(order: Order, on_updated: Callback<Order>) -> impl IntoView {
    let shop = use_shop();
    let pending = RwSignal::new(false);
    let id = order.id.clone();
    let cancellable = order.status.can_cancel();

    let cancel = move |_| {
        let id = id.clone();
        pending.set(true);
        spawn_local(async move {
            match cancel_order(id).await {
                Ok(updated) => {
                    shop.toasts.success(format!("Order {} cancelled", updated.number));
                    on_updated.run(updated);
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            pending.set(false);
        });
    };

    view! {
        <article class="order-card">
            <header>
                <h2>{format!("Order {}", order.number)}</h2>
                <span class=format!("status status-{}", order.status.as_str())>{order.status.display_name()}</span>
                <time>{order.placed_at.format("%d %b %Y").to_string()}</time>
            </header>
            <ul>
                {order.lines.into_iter().map(|line| view! {
                    <li>
                        <span>{format!("{} \u{d7} {}", line.title, line.quantity)}</span>
                        <span>{line.line_total().map(|m| m.display()).unwrap_or_default()}</span>
                    </li>
                }).collect_view()}
            </ul>
            <p class="muted">{order.shipping_address.one_line()}</p>
            <footer>
                <strong>{format!("Total {}", order.total.display())}</strong>
                <span class="muted">{order.payment_method.display_name()}</span>
                {cancellable.then(|| view! {
                    <button class="btn-outline" disabled=pending on:click=cancel>"Cancel order"</button>
                })}
            </footer>
        </article>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let shop = use_shop();
    let (name, phone) = shop.store.with_untracked(|s| {
        s.auth
            .user()
            .map(|u| (u.name.clone(), u.phone.clone().unwrap_or_default()))
            .unwrap_or_default()
    });
    let name = RwSignal::new(name);
    let phone = RwSignal::new(phone);
    let pending = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        pending.set(true);
        spawn_local(async move {
            let phone = Some(phone.get_untracked());
            match update_profile(name.get_untracked(), phone).await {
                Ok(user) => {
                    shop.store.update(|s| s.auth.set_user(Some(user)));
                    shop.toasts.success("Profile updated");
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            pending.set(false);
        });
    };

    view! {
        <details class="profile">
            <summary>"Account details"</summary>
            <form on:submit=submit>
                <label>
                    "Name"
                    <input type="text" prop:value=name on:input=move |ev| name.set(event_target_value(&ev))/>
                </label>
                <label>
                    "Phone"
                    <input type="tel" prop:value=phone on:input=move |ev| phone.set(event_target_value(&ev))/>
                </label>
                <button class="btn" type="submit" disabled=pending>"Save"</button>
            </form>
        </details>
    }
}
