use super::modal::Modal;
use leptos::prelude::*;
use maison_commerce::catalog::{ProductQuery, SortOption};

fn parse_rupees(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|v| *v >= 0).map(|v| v * 100)
}

/// Listing filters (size, colour, price, sort) in a slide-over sheet.
/// Edits go straight into `query`; every change returns to page one.
#[component]
pub fn FilterSheet(
    query: RwSignal<ProductQuery>,
    open: RwSignal<bool>,
    sizes: Vec<String>,
    colors: Vec<String>,
) -> impl IntoView {
    let close = Callback::new(move |_: ()| open.set(false));
    let sizes = StoredValue::new(sizes);
    let colors = StoredValue::new(colors);

    let chip = move |value: String, is_size: bool| {
        let selected = {
            let value = value.clone();
            move || {
                query.with(|q| {
                    let list = if is_size { &q.sizes } else { &q.colors };
                    list.contains(&value)
                })
            }
        };
        let toggle_value = value.clone();
        view! {
            <button
                class="filter-chip"
                class:selected=selected
                on:click=move |_| query.update(|q| {
                    if is_size {
                        q.toggle_size(&toggle_value);
                    } else {
                        q.toggle_color(&toggle_value);
                    }
                    q.page = 1;
                })
            >
                {value}
            </button>
        }
    };

    let on_min = move |ev: leptos::ev::Event| {
        let min = parse_rupees(&event_target_value(&ev));
        query.update(|q| *q = q.clone().with_price_range(min, q.max_price));
    };
    let on_max = move |ev: leptos::ev::Event| {
        let max = parse_rupees(&event_target_value(&ev));
        query.update(|q| *q = q.clone().with_price_range(q.min_price, max));
    };

    view! {
        <Modal open=open on_close=close title="Filter & sort">
            <section class="filter-group">
                <h3>"Sort by"</h3>
                <select on:change=move |ev| {
                    if let Some(sort) = SortOption::from_str(&event_target_value(&ev)) {
                        query.update(|q| {
                            q.sort = sort;
                            q.page = 1;
                        });
                    }
                }>
                    {SortOption::ALL
                        .iter()
                        .map(|opt| {
                            let opt = *opt;
                            view! {
                                <option value=opt.as_str() selected=move || query.with(|q| q.sort == opt)>
                                    {opt.display_name()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </section>
            <section class="filter-group">
                <h3>"Size"</h3>
                {sizes.get_value().into_iter().map(|s| chip(s, true)).collect_view()}
            </section>
            <section class="filter-group">
                <h3>"Colour"</h3>
                {colors.get_value().into_iter().map(|c| chip(c, false)).collect_view()}
            </section>
            <section class="filter-group">
                <h3>"Price"</h3>
                <input type="number" min="0" placeholder="Min" on:change=on_min/>
                <input type="number" min="0" placeholder="Max" on:change=on_max/>
            </section>
            <footer class="filter-actions">
                <button
                    class="btn-secondary"
                    disabled=move || query.with(|q| q.active_filter_count() == 0)
                    on:click=move |_| query.update(ProductQuery::clear_filters)
                >
                    "Clear all"
                </button>
                <button class="btn" on:click=move |_| open.set(false)>"Show results"</button>
            </footer>
        </Modal>
    }
}
