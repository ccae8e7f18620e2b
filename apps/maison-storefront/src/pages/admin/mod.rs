//! Admin dashboard. The backend enforces roles; the guard here only keeps
//! customers from seeing controls they cannot use.

mod content;
mod inquiries;
mod navigation;
mod orders;
mod testimonials;
mod users;

use super::SignInPrompt;
use crate::state::use_shop;
use leptos::prelude::*;
use leptos_meta::Title;
use maison_ui::{Positioned, ReorderList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Orders,
    Testimonials,
    Inquiries,
    Users,
    Navigation,
    Content,
}

impl Tab {
    const ALL: [Tab; 6] = [
        Tab::Orders,
        Tab::Testimonials,
        Tab::Inquiries,
        Tab::Users,
        Tab::Navigation,
        Tab::Content,
    ];

    fn label(self) -> &'static str {
        match self {
            Tab::Orders => "Orders",
            Tab::Testimonials => "Testimonials",
            Tab::Inquiries => "Inquiries",
            Tab::Users => "Users",
            Tab::Navigation => "Navigation",
            Tab::Content => "Homepage & legal",
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let shop = use_shop();
    let resolved = move || shop.store.with(|s| s.auth.is_resolved());
    let is_admin = move || shop.store.with(|s| s.auth.is_admin());
    let tab = RwSignal::new(Tab::Orders);

    view! {
        <Title text="Admin"/>
        <Show when=resolved fallback=|| view! { <p>"Checking your account..."</p> }>
            <Show
                when=is_admin
                fallback=|| view! { <SignInPrompt reason="Sign in with an admin account to manage the store."/> }
            >
                <div class="admin">
                    <nav class="admin-tabs" role="tablist">
                        {Tab::ALL.into_iter().map(|t| view! {
                            <button
                                role="tab"
                                class:active=move || tab.get() == t
                                on:click=move |_| tab.set(t)
                            >
                                {t.label()}
                            </button>
                        }).collect_view()}
                    </nav>
                    <section class="admin-panel">
                        {move || match tab.get() {
                            Tab::Orders => view! { <orders::OrdersPanel/> }.into_any(),
                            Tab::Testimonials => view! { <testimonials::TestimonialsPanel/> }.into_any(),
                            Tab::Inquiries => view! { <inquiries::InquiriesPanel/> }.into_any(),
                            Tab::Users => view! { <users::UsersPanel/> }.into_any(),
                            Tab::Navigation => view! { <navigation::NavigationPanel/> }.into_any(),
                            Tab::Content => view! { <content::ContentPanel/> }.into_any(),
                        }}
                    </section>
                </div>
            </Show>
        </Show>
    }
}

/// Drag-and-drop list with up/down buttons as a keyboard alternative.
/// `on_save` receives the renumbered items whenever the order changes.
#[component]
fn SortableList<T, K, L, A, AV>(
    list: RwSignal<ReorderList<T>>,
    /// Stable identity for each row.
    key: K,
    label: L,
    /// Extra controls rendered at the end of each row.
    actions: A,
    on_save: Callback<Vec<T>>,
) -> impl IntoView
where
    T: Positioned + Clone + PartialEq + Send + Sync + 'static,
    K: Fn(&T) -> String + Copy + Send + Sync + 'static,
    L: Fn(&T) -> String + Copy + Send + Sync + 'static,
    A: Fn(T) -> AV + Copy + Send + Sync + 'static,
    AV: IntoView + 'static,
{
    let save = move || on_save.run(list.with_untracked(|l| l.items().to_vec()));
    let finish = move || {
        if list.try_update(ReorderList::drop).unwrap_or(false) {
            save();
        }
    };
    let shift = move |from: usize, to: usize| {
        if list.try_update(|l| l.move_item(from, to)).unwrap_or(false) {
            save();
        }
    };

    view! {
        <ol class="sortable">
            <For
                each=move || list.with(|l| l.items().to_vec())
                key=move |item| key(item)
                children=move |item| {
                    let id = StoredValue::new(key(&item));
                    let index = move || {
                        id.with_value(|id| list.with(|l| l.items().iter().position(|i| &key(i) == id).unwrap_or(0)))
                    };
                    let len = move || list.with(|l| l.items().len());
                    view! {
                        <li
                            draggable="true"
                            class:dragging=move || list.with(|l| l.dragged() == Some(index()))
                            on:dragstart=move |_| list.update(|l| l.begin_drag(index()))
                            on:dragover=move |ev| {
                                ev.prevent_default();
                                list.update(|l| l.drag_over(index()));
                            }
                            on:drop=move |ev| {
                                ev.prevent_default();
                                finish();
                            }
                            on:dragend=move |_| list.update(ReorderList::cancel)
                        >
                            <span class="drag-handle" aria-hidden="true">"\u{2807}"</span>
                            <span class="sortable-label">{label(&item)}</span>
                            <button
                                aria-label="Move up"
                                disabled=move || index() == 0
                                on:click=move |_| {
                                    let i = index();
                                    shift(i, i.saturating_sub(1));
                                }
                            >
                                "\u{2191}"
                            </button>
                            <button
                                aria-label="Move down"
                                disabled=move || index() + 1 >= len()
                                on:click=move |_| {
                                    let i = index();
                                    shift(i, i + 1);
                                }
                            >
                                "\u{2193}"
                            </button>
                            {actions(item.clone())}
                        </li>
                    }
                }
            />
        </ol>
    }
}
