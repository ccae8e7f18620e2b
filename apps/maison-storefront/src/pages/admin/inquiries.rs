use crate::api::{admin_inquiries, delete_inquiry, update_inquiry_status};
use crate::pages::LoadError;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use maison_commerce::prelude::*;

#[component]
pub fn InquiriesPanel() -> impl IntoView {
    let shop = use_shop();
    let filter = RwSignal::new(Some(InquiryStatus::Open));
    let inquiries = Resource::new(move || filter.get(), admin_inquiries);

    let set_status = move |id: InquiryId, status: InquiryStatus| {
        spawn_local(async move {
            match update_inquiry_status(id, status).await {
                Ok(_) => inquiries.refetch(),
                Err(e) => shop.toasts.error(error_message(&e)),
            }
        });
    };
    let remove = move |id: InquiryId| {
        spawn_local(async move {
            match delete_inquiry(id).await {
                Ok(()) => {
                    shop.toasts.success("Inquiry deleted");
                    inquiries.refetch();
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
        });
    };

    view! {
        <h2>"Inquiries"</h2>
        <div class="admin-filters">
            <button class:active=move || filter.get().is_none() on:click=move |_| filter.set(None)>"All"</button>
            {InquiryStatus::ALL.into_iter().map(|s| view! {
                <button class:active=move || filter.get() == Some(s) on:click=move |_| filter.set(Some(s))>
                    {s.display_name()}
                </button>
            }).collect_view()}
        </div>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || inquiries.get().map(|result| match result {
                Ok(list) if list.is_empty() => view! { <p class="muted">"Nothing here."</p> }.into_any(),
                Ok(list) => list.into_iter().map(|inquiry| {
                    let (status_id, delete_id) = (inquiry.id.clone(), inquiry.id.clone());
                    let current = inquiry.status;
                    view! {
                        <article class="inquiry">
                            <header>
                                <h3>{inquiry.subject}</h3>
                                <time>{inquiry.created_at.format("%d %b %Y").to_string()}</time>
                            </header>
                            <p class="muted">
                                {inquiry.name} " \u{b7} "
                                <a href=format!("mailto:{}", inquiry.email)>{inquiry.email.clone()}</a>
                                {inquiry.phone.map(|p| format!(" \u{b7} {p}"))}
                            </p>
                            <p>{inquiry.message}</p>
                            <footer>
                                <select on:change=move |ev| {
                                    if let Some(s) = InquiryStatus::from_str(&event_target_value(&ev)) {
                                        set_status(status_id.clone(), s);
                                    }
                                }>
                                    {InquiryStatus::ALL.into_iter().map(|s| view! {
                                        <option value=s.as_str() selected=s == current>{s.display_name()}</option>
                                    }).collect_view()}
                                </select>
                                <button class="link danger" on:click=move |_| remove(delete_id.clone())>"Delete"</button>
                            </footer>
                        </article>
                    }
                }).collect_view().into_any(),
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
    }
}
