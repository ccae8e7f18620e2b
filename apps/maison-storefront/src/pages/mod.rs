//! Route components.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod legal;
pub mod orders;
pub mod product;
pub mod products;
pub mod wishlist;

use leptos::prelude::*;

/// Inline error block for a failed load.
#[component]
pub fn LoadError(#[prop(into)] message: String) -> impl IntoView {
    view! { <p class="load-error" role="alert">{message}</p> }
}

/// Shown by account pages to signed-out visitors.
#[component]
pub fn SignInPrompt(#[prop(into)] reason: String) -> impl IntoView {
    view! {
        <div class="sign-in-prompt">
            <p>{reason}</p>
            <a href="/login" class="btn">"Sign in"</a>
        </div>
    }
}
