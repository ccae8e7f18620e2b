//! Sign-in, registration and password recovery.

use crate::api::{login, register, request_password_reset};
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;
use maison_commerce::user::{Credentials, Registration};

/// A text input bound to `value`.
#[component]
fn Field(
    #[prop(into)] label: String,
    #[prop(default = "text")] kind: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] autocomplete: Option<&'static str>,
) -> impl IntoView {
    view! {
        <label>
            {label}
            <input
                type=kind
                autocomplete=autocomplete
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </label>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let shop = use_shop();
    let navigate = use_navigate();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let pending = RwSignal::new(false);
    let forgot_open = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(errors) = credentials.validate() {
            for e in errors {
                shop.toasts.error(e.to_string());
            }
            return;
        }
        pending.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match login(credentials.email, credentials.password).await {
                Ok(user) => {
                    let greeting = format!("Welcome back, {}", user.first_name());
                    let admin = user.is_admin();
                    shop.signed_in(user);
                    shop.toasts.success(greeting);
                    navigate(if admin { "/admin" } else { "/" }, Default::default());
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            pending.set(false);
        });
    };

    view! {
        <Title text="Sign in"/>
        <div class="auth-page">
            <h1>"Sign in"</h1>
            <form on:submit=submit>
                <Field label="Email" kind="email" value=email autocomplete="email"/>
                <Field label="Password" kind="password" value=password autocomplete="current-password"/>
                <button class="btn" type="submit" disabled=pending>
                    {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
            <button class="link" on:click=move |_| forgot_open.update(|o| *o = !*o)>"Forgot your password?"</button>
            <Show when=move || forgot_open.get()>
                <ForgotPasswordForm/>
            </Show>
            <p>"New to Maison? " <a href="/register">"Create an account"</a></p>
        </div>
    }
}

#[component]
fn ForgotPasswordForm() -> impl IntoView {
    let shop = use_shop();
    let email = RwSignal::new(String::new());
    let sent = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            match request_password_reset(email.get_untracked()).await {
                Ok(()) => sent.set(true),
                Err(e) => shop.toasts.error(error_message(&e)),
            }
        });
    };

    view! {
        <Show
            when=move || !sent.get()
            fallback=|| view! { <p>"If that email has an account, a reset link is on its way."</p> }
        >
            <form class="forgot-password" on:submit=submit>
                <Field label="Email" kind="email" value=email autocomplete="email"/>
                <button class="btn-outline" type="submit">"Send reset link"</button>
            </form>
        </Show>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let shop = use_shop();
    let navigate = use_navigate();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let errors = RwSignal::new(Vec::<String>::new());
    let pending = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let phone = phone.get_untracked();
        let registration = Registration {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: (!phone.trim().is_empty()).then_some(phone),
            password: password.get_untracked(),
            confirm_password: confirm.get_untracked(),
        };
        if let Err(found) = registration.validate() {
            errors.set(found.iter().map(ToString::to_string).collect());
            return;
        }
        errors.set(Vec::new());
        pending.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let Registration {
                name,
                email,
                phone,
                password,
                confirm_password,
            } = registration;
            match register(name, email, phone, password, confirm_password).await {
                Ok(user) => {
                    shop.signed_in(user);
                    shop.toasts.success("Welcome to Maison");
                    navigate("/", Default::default());
                }
                Err(e) => errors.set(vec![error_message(&e)]),
            }
            pending.set(false);
        });
    };

    view! {
        <Title text="Create account"/>
        <div class="auth-page">
            <h1>"Create an account"</h1>
            <ul class="form-errors" role="alert">
                {move || errors.get().into_iter().map(|e| view! { <li>{e}</li> }).collect_view()}
            </ul>
            <form on:submit=submit>
                <Field label="Full name" value=name autocomplete="name"/>
                <Field label="Email" kind="email" value=email autocomplete="email"/>
                <Field label="Phone (optional)" kind="tel" value=phone autocomplete="tel"/>
                <Field label="Password" kind="password" value=password autocomplete="new-password"/>
                <Field label="Confirm password" kind="password" value=confirm autocomplete="new-password"/>
                <button class="btn" type="submit" disabled=pending>
                    {move || if pending.get() { "Creating account..." } else { "Create account" }}
                </button>
            </form>
            <p>"Already have an account? " <a href="/login">"Sign in"</a></p>
        </div>
    }
}
