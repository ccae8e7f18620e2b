//! Contact form, filed as an inquiry for the admin team.

use crate::api::submit_inquiry;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use maison_commerce::inquiry::NewInquiry;

#[component]
pub fn ContactPage() -> impl IntoView {
    let shop = use_shop();
    let form = RwSignal::new(NewInquiry::default());
    let errors = RwSignal::new(Vec::<String>::new());
    let sent = RwSignal::new(false);
    let pending = RwSignal::new(false);

    let input = move |label: &'static str, kind: &'static str, get: fn(&NewInquiry) -> String, set: fn(&mut NewInquiry, String)| {
        view! {
            <label>
                {label}
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </label>
        }
    };

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let inquiry = form.get_untracked().normalized();
        if let Err(found) = inquiry.validate() {
            errors.set(found.iter().map(ToString::to_string).collect());
            return;
        }
        errors.set(Vec::new());
        pending.set(true);
        spawn_local(async move {
            match submit_inquiry(inquiry).await {
                Ok(()) => {
                    sent.set(true);
                    form.set(NewInquiry::default());
                    shop.toasts.success("Message sent. We'll get back to you soon.");
                }
                Err(e) => errors.set(vec![error_message(&e)]),
            }
            pending.set(false);
        });
    };

    view! {
        <Title text="Contact us"/>
        <div class="contact-page">
            <h1>"Contact us"</h1>
            <Show
                when=move || !sent.get()
                fallback=move || view! {
                    <p>"Thanks for writing to us. Our team usually replies within a day."</p>
                    <button class="link" on:click=move |_| sent.set(false)>"Send another message"</button>
                }
            >
                <ul class="form-errors" role="alert">
                    {move || errors.get().into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
                </ul>
                <form on:submit=submit>
                    {input("Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                    {input("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {input("Phone (optional)", "tel", |f| f.phone.clone().unwrap_or_default(), |f, v| {
                        f.phone = (!v.trim().is_empty()).then_some(v)
                    })}
                    {input("Subject", "text", |f| f.subject.clone(), |f, v| f.subject = v)}
                    <label>
                        "Message"
                        <textarea
                            rows="6"
                            prop:value=move || form.with(|f| f.message.clone())
                            on:input=move |ev| form.update(|f| f.message = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <button class="btn" type="submit" disabled=pending>
                        {move || if pending.get() { "Sending..." } else { "Send message" }}
                    </button>
                </form>
            </Show>
        </div>
    }
}
