use crate::api::{admin_orders, update_order_status};
use crate::pages::LoadError;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use maison_commerce::prelude::*;
use maison_ui::components::Pagination;

#[component]
pub fn OrdersPanel() -> impl IntoView {
    let shop = use_shop();
    let status = RwSignal::new(None::<OrderStatus>);
    let page = RwSignal::new(1u32);
    let orders = Resource::new(move || (status.get(), page.get()), |(s, p)| admin_orders(s, p));
    let total_pages = Signal::derive(move || {
        orders.get().and_then(Result::ok).map(|p| p.total_pages()).unwrap_or(1)
    });

    let set_status = move |id: OrderId, next: OrderStatus| {
        spawn_local(async move {
            match update_order_status(id, next).await {
                Ok(order) => {
                    shop.toasts.success(format!("Order {} is now {}", order.number, next.display_name()));
                    orders.refetch();
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
        });
    };

    view! {
        <h2>"Orders"</h2>
        <label>
            "Status "
            <select on:change=move |ev| {
                status.set(OrderStatus::from_str(&event_target_value(&ev)));
                page.set(1);
            }>
                <option value="">"All"</option>
                {OrderStatus::ALL.into_iter().map(|s| view! {
                    <option value=s.as_str()>{s.display_name()}</option>
                }).collect_view()}
            </select>
        </label>
        <Suspense fallback=|| view! { <p>"Loading orders..."</p> }>
            {move || orders.get().map(|result| match result {
                Ok(list) => view! {
                    <table class="admin-table">
                        <thead>
                            <tr><th>"Order"</th><th>"Placed"</th><th>"Customer"</th><th>"Items"</th><th>"Total"</th><th>"Status"</th></tr>
                        </thead>
                        <tbody>
                            {list.items.into_iter().map(|order| {
                                let id = order.id.clone();
                                let current = order.status;
                                view! {
                                    <tr>
                                        <td>{order.number}</td>
                                        <td>{order.placed_at.format("%d %b %Y %H:%M").to_string()}</td>
                                        <td>{order.shipping_address.full_name}</td>
                                        <td>{order.lines.iter().map(|l| l.quantity).sum::<u32>()}</td>
                                        <td>{order.total.display()}</td>
                                        <td>
                                            <select
                                                disabled=current.is_terminal()
                                                on:change=move |ev| {
                                                    if let Some(next) = OrderStatus::from_str(&event_target_value(&ev)) {
                                                        set_status(id.clone(), next);
                                                    }
                                                }
                                            >
                                                {OrderStatus::ALL.into_iter().map(|s| view! {
                                                    <option value=s.as_str() selected=s == current>{s.display_name()}</option>
                                                }).collect_view()}
                                            </select>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any(),
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
        <Pagination page=page total_pages=total_pages on_change=Callback::new(move |p: u32| page.set(p))/>
    }
}
