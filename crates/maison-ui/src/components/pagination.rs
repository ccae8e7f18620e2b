use leptos::prelude::*;
use maison_commerce::catalog::Page;

/// Window of numbered buttons around the current page.
pub const VISIBLE_PAGES: u32 = 5;

/// Pager for listing results. `page` is 1-indexed.
#[component]
pub fn Pagination(
    #[prop(into)] page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    let numbers = move || {
        Page::<()>::new(Vec::new(), page.get(), 1, u64::from(total_pages.get())).page_numbers(VISIBLE_PAGES)
    };

    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <nav class="pagination" aria-label="Pagination">
                <button
                    class="pagination-prev"
                    disabled=move || page.get() <= 1
                    on:click=move |_| on_change.run(page.get().saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                {move || {
                    numbers()
                        .into_iter()
                        .map(|n| {
                            view! {
                                <button
                                    class="pagination-page"
                                    class:current=move || page.get() == n
                                    aria-current=move || (page.get() == n).then_some("page")
                                    on:click=move |_| on_change.run(n)
                                >
                                    {n.to_string()}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button
                    class="pagination-next"
                    disabled=move || page.get() >= total_pages.get()
                    on:click=move |_| on_change.run((page.get() + 1).min(total_pages.get()))
                >
                    "Next"
                </button>
            </nav>
        </Show>
    }
}
