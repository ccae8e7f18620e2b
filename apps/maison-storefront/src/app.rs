//! Application shell, layout and routes.

use crate::api::navigation;
use crate::pages::{
    admin::AdminPage, auth::LoginPage, auth::RegisterPage, cart::CartPage, checkout::CheckoutPage,
    contact::ContactPage, home::HomePage, legal::LegalPageView, orders::OrdersPage, product::ProductPage,
    products::ProductsPage, wishlist::WishlistPage,
};
use crate::state::{provide_store, use_shop};
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::hooks::use_location;
use leptos_router::path;
use maison_commerce::content::NavItem;
use maison_ui::Toaster;

pub const STORE_NAME: &str = "Maison";

// ============================================================================
// Shell (SSR entry point)
// ============================================================================

#[cfg(feature = "ssr")]
pub fn shell(options: leptos::config::LeptosOptions) -> impl IntoView {
    use leptos::hydration::{AutoReload, HydrationScripts};

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options=options.clone() root=""/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

// ============================================================================
// App Component
// ============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_store();

    let fallback = || view! { <NotFound/> }.into_view();

    view! {
        <Stylesheet id="leptos" href="/pkg/maison_storefront.css"/>
        <Meta name="description" content="Maison: handcrafted Indian fashion, delivered"/>
        <Title formatter=|page: String| if page.is_empty() { STORE_NAME.to_string() } else { format!("{page} | {STORE_NAME}") }/>

        <Toaster>
            <Router>
                <Header/>
                <main>
                    <Routes fallback>
                        <Route path=path!("") view=HomePage/>
                        <Route path=path!("/products") view=ProductsPage/>
                        <Route path=path!("/products/:handle") view=ProductPage/>
                        <Route path=path!("/cart") view=CartPage/>
                        <Route path=path!("/wishlist") view=WishlistPage/>
                        <Route path=path!("/checkout") view=CheckoutPage/>
                        <Route path=path!("/orders") view=OrdersPage/>
                        <Route path=path!("/login") view=LoginPage/>
                        <Route path=path!("/register") view=RegisterPage/>
                        <Route path=path!("/contact") view=ContactPage/>
                        <Route path=path!("/legal/:slug") view=LegalPageView/>
                        <Route path=path!("/admin") view=AdminPage/>
                    </Routes>
                </main>
                <Footer/>
            </Router>
        </Toaster>
    }
}

// ============================================================================
// Layout Components
// ============================================================================

fn default_navigation() -> Vec<NavItem> {
    vec![
        NavItem::new("Shop", "/products"),
        NavItem::new("Contact", "/contact"),
    ]
}

#[component]
fn Header() -> impl IntoView {
    let shop = use_shop();
    let store = shop.store;
    // Browser only: resolve the signed-in user once the page is live.
    Effect::new(move |_| shop.sync_session());
    let menu = Resource::new(|| (), |_| navigation());
    let location = use_location();

    let bag_count = move || store.with(|s| s.cart.item_count());
    let saved_count = move || store.with(|s| s.wishlist.len());
    let user_name = move || store.with(|s| s.auth.user().map(|u| u.first_name().to_string()));
    let is_admin = move || store.with(|s| s.auth.is_admin());

    view! {
        <header class="site-header">
            <A href="/" attr:class="brand">{STORE_NAME}</A>
            <nav class="main-nav" aria-label="Main">
                <Suspense fallback=|| ()>
                    {move || menu.get().map(|result| {
                        let items = match result {
                            Ok(items) if !items.is_empty() => items,
                            _ => default_navigation(),
                        };
                        items
                            .into_iter()
                            .map(|item| view! { <NavLink item=item path=location.pathname/> })
                            .collect_view()
                    })}
                </Suspense>
            </nav>
            <div class="header-actions">
                <A href="/wishlist">"Wishlist (" {saved_count} ")"</A>
                <A href="/cart">"Bag (" {bag_count} ")"</A>
                {move || match user_name() {
                    Some(name) => view! {
                        <A href="/orders">{format!("Hi, {name}")}</A>
                        <Show when=is_admin>
                            <A href="/admin">"Admin"</A>
                        </Show>
                        <button class="link" on:click=move |_| shop.sign_out()>"Sign out"</button>
                    }
                    .into_any(),
                    None => view! { <A href="/login">"Sign in"</A> }.into_any(),
                }}
            </div>
        </header>
    }
}

#[component]
fn NavLink(item: NavItem, #[prop(into)] path: Signal<String>) -> impl IntoView {
    let active = {
        let item = item.clone();
        move || item.is_active(&path.get())
    };
    let children = item.children;

    view! {
        <div class="nav-item" class:active=active>
            <a href=item.href>{item.label}</a>
            {(!children.is_empty()).then(|| view! {
                <div class="nav-dropdown">
                    {children
                        .into_iter()
                        .map(|child| view! { <a href=child.href>{child.label}</a> })
                        .collect_view()}
                </div>
            })}
        </div>
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <nav aria-label="Policies">
                <a href="/legal/privacy-policy">"Privacy"</a>
                <a href="/legal/terms-of-service">"Terms"</a>
                <a href="/legal/shipping-policy">"Shipping"</a>
                <a href="/legal/return-policy">"Returns"</a>
                <a href="/contact">"Contact us"</a>
            </nav>
            <p>{format!("\u{a9} {STORE_NAME}. Made in India.")}</p>
        </footer>
    }
}

/// 404 page
#[component]
pub fn NotFound() -> impl IntoView {
    #[cfg(feature = "ssr")]
    crate::backend::set_status(leptos_wasi::prelude::StatusCode::NOT_FOUND);

    view! {
        <Title text="Not found"/>
        <div class="not-found">
            <h1>"404"</h1>
            <p>"We couldn't find that page."</p>
            <a href="/" class="btn">"Back to Home"</a>
        </div>
    }
}
