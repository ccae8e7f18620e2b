//! Product listing with search, filters and pagination. The query lives in
//! the URL so listings can be shared and survive a reload.

use super::LoadError;
use crate::api::list_products;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;
use maison_commerce::prelude::*;
use maison_ui::components::{FilterSheet, Pagination, ProductCard, ProductGridSkeleton};

const QUERY_KEYS: [&str; 9] = [
    "collection", "q", "size", "color", "minPrice", "maxPrice", "sort", "page", "perPage",
];

const SIZES: [&str; 7] = ["XS", "S", "M", "L", "XL", "XXL", "Free Size"];
const COLORS: [&str; 10] = [
    "Black", "White", "Ivory", "Red", "Maroon", "Pink", "Blue", "Green", "Yellow", "Gold",
];

fn listing_url(query: &ProductQuery) -> String {
    let pairs: Vec<String> = query
        .to_query_pairs()
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
        .collect();
    format!("/products?{}", pairs.join("&"))
}

#[component]
pub fn ProductsPage() -> impl IntoView {
    let shop = use_shop();
    let url = use_query_map();
    let initial = url.with_untracked(|params| {
        ProductQuery::from_query_pairs(
            QUERY_KEYS
                .iter()
                .filter_map(|key| params.get_str(key).map(|value| (*key, value))),
        )
    });
    let query = RwSignal::new(initial);
    let filters_open = RwSignal::new(false);

    let navigate = use_navigate();
    Effect::new(move |_| {
        let href = query.with(listing_url);
        navigate(
            &href,
            NavigateOptions {
                replace: true,
                scroll: false,
                ..Default::default()
            },
        );
    });

    let products = Resource::new(move || query.get(), list_products);

    let heading = move || {
        query.with(|q| match (&q.collection, &q.search) {
            (_, Some(search)) => format!("Results for \u{201c}{search}\u{201d}"),
            (Some(collection), None) => collection.replace('-', " "),
            (None, None) => "All products".to_string(),
        })
    };
    let total_pages = Signal::derive(move || {
        products
            .get()
            .and_then(Result::ok)
            .map(|page| page.total_pages())
            .unwrap_or(1)
    });

    view! {
        <Title text=heading/>
        <div class="listing-header">
            <h1>{heading}</h1>
            <input
                type="search"
                placeholder="Search sarees, kurtas, lehengas"
                prop:value=move || query.with(|q| q.search.clone().unwrap_or_default())
                on:change=move |ev| {
                    let text = event_target_value(&ev);
                    query.update(|q| *q = std::mem::take(q).with_search(text));
                }
            />
            <button class="btn-outline" on:click=move |_| filters_open.set(true)>
                "Filters"
                {move || match query.with(ProductQuery::active_filter_count) {
                    0 => String::new(),
                    n => format!(" ({n})"),
                }}
            </button>
        </div>

        <FilterSheet
            query=query
            open=filters_open
            sizes=SIZES.iter().map(|s| s.to_string()).collect()
            colors=COLORS.iter().map(|c| c.to_string()).collect()
        />

        <Suspense fallback=|| view! { <ProductGridSkeleton/> }>
            {move || products.get().map(|result| match result {
                Ok(page) if page.is_empty() => view! {
                    <div class="empty-state">
                        <p>"No products match these filters."</p>
                        <button class="btn" on:click=move |_| query.update(ProductQuery::clear_filters)>
                            "Clear filters"
                        </button>
                    </div>
                }.into_any(),
                Ok(page) => view! {
                    <p class="result-count">{format!("{} products", page.total)}</p>
                    <div class="products">
                        {page.items.into_iter().map(|product| {
                            let id = product.id.clone();
                            let wishlisted = Signal::derive(move || shop.store.with(|s| s.wishlist.contains(&id)));
                            view! {
                                <ProductCard
                                    product=product
                                    wishlisted=wishlisted
                                    on_wishlist=Callback::new(move |p: Product| shop.toggle_wishlist(p))
                                />
                            }
                        }).collect_view()}
                    </div>
                }.into_any(),
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>

        <Pagination
            page=Signal::derive(move || query.with(|q| q.page))
            total_pages=total_pages
            on_change=Callback::new(move |page: u32| query.update(|q| q.page = page))
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_encodes_values() {
        let query = ProductQuery::new().with_search("silk saree");
        assert_eq!(listing_url(&query), "/products?q=silk%20saree&perPage=24");
    }

    #[test]
    fn test_listing_url_round_trips_through_query_pairs() {
        let mut query = ProductQuery::new().in_collection("festive");
        query.toggle_size("M");
        query.toggle_size("L");
        let href = listing_url(&query);
        let raw = href.trim_start_matches("/products?");
        let decoded: Vec<(String, String)> = raw
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), urlencoding::decode(v).unwrap().into_owned()))
            .collect();
        let parsed = ProductQuery::from_query_pairs(decoded.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        assert_eq!(parsed, query);
    }
}
