use super::SortableList;
use crate::api::{navigation, save_navigation};
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use maison_commerce::content::{self, NavItem};
use maison_commerce::ids::NavItemId;
use maison_ui::ReorderList;

#[component]
pub fn NavigationPanel() -> impl IntoView {
    let shop = use_shop();
    let loaded = Resource::new(|| (), |_| navigation());
    let list = RwSignal::new(ReorderList::new(Vec::<NavItem>::new()));
    let dirty = RwSignal::new(false);
    let saving = RwSignal::new(false);

    Effect::new(move |_| {
        if let Some(Ok(mut items)) = loaded.get() {
            content::sort_tree(&mut items);
            list.set(ReorderList::new(items));
            dirty.set(false);
        }
    });

    let edit_tree = move |f: &dyn Fn(&mut Vec<NavItem>)| {
        list.update(|l| {
            let mut items = l.items().to_vec();
            f(&mut items);
            content::renumber(&mut items);
            *l = ReorderList::new(items);
        });
        dirty.set(true);
    };
    let remove = move |id: NavItemId| {
        edit_tree(&|items: &mut Vec<NavItem>| {
            content::remove(items, &id);
        })
    };

    let save = move |_| {
        let mut items = list.with_untracked(|l| l.items().to_vec());
        content::renumber(&mut items);
        if let Err(errors) = content::validate_tree(&items) {
            for e in errors {
                shop.toasts.error(e.to_string());
            }
            return;
        }
        saving.set(true);
        spawn_local(async move {
            match save_navigation(items).await {
                Ok(saved) => {
                    list.set(ReorderList::new(saved));
                    dirty.set(false);
                    shop.toasts.success("Navigation saved");
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            saving.set(false);
        });
    };

    view! {
        <h2>"Navigation"</h2>
        <SortableList
            list=list
            key=|item: &NavItem| item.id.to_string()
            label=|item: &NavItem| format!("{} \u{2192} {}", item.label, item.href)
            actions=move |item: NavItem| {
                let id = item.id.clone();
                let children = {
                    let id = id.clone();
                    move || list.with(|l| content::find(l.items(), &id).map(|i| i.children.clone()).unwrap_or_default())
                };
                view! {
                    <button class="link danger" on:click=move |_| remove(id.clone())>"Remove"</button>
                    <ul class="nav-children">
                        {move || children().into_iter().map(|child| {
                            let child_id = child.id.clone();
                            view! {
                                <li>
                                    {child.label} " \u{2192} " {child.href}
                                    <button class="link danger" on:click=move |_| remove(child_id.clone())>"Remove"</button>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }
            }
            on_save=Callback::new(move |_| dirty.set(true))
        />
        <AddNavItem
            parents=Signal::derive(move || list.with(|l| l.items().iter().map(|i| (i.id.clone(), i.label.clone())).collect()))
            on_add=Callback::new(move |(parent, item): (Option<NavItemId>, NavItem)| {
                edit_tree(&|items: &mut Vec<NavItem>| match &parent {
                    Some(pid) => {
                        if let Some(p) = items.iter_mut().find(|i| &i.id == pid) {
                            p.children.push(item.clone());
                        }
                    }
                    None => items.push(item.clone()),
                })
            })
        />
        <button class="btn" disabled=move || !dirty.get() || saving.get() on:click=save>
            {move || if saving.get() { "Saving..." } else { "Save navigation" }}
        </button>
    }
}

#[component]
fn AddNavItem(
    #[prop(into)] parents: Signal<Vec<(NavItemId, String)>>,
    on_add: Callback<(Option<NavItemId>, NavItem)>,
) -> impl IntoView {
    let label = RwSignal::new(String::new());
    let href = RwSignal::new(String::new());
    let parent = RwSignal::new(String::new());

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let item = NavItem::new(label.get_untracked().trim(), href.get_untracked().trim());
        let parent_id = parent.with_untracked(|p| (!p.is_empty()).then(|| NavItemId::new(p.as_str())));
        on_add.run((parent_id, item));
        label.set(String::new());
        href.set(String::new());
    };

    view! {
        <form class="admin-form inline" on:submit=submit>
            <input
                placeholder="Label"
                prop:value=label
                on:input=move |ev| label.set(event_target_value(&ev))
            />
            <input
                placeholder="/collections/sarees"
                prop:value=href
                on:input=move |ev| href.set(event_target_value(&ev))
            />
            <select on:change=move |ev| parent.set(event_target_value(&ev))>
                <option value="">"Top level"</option>
                {move || parents.get().into_iter().map(|(id, label)| view! {
                    <option value=id.to_string()>{format!("Under {label}")}</option>
                }).collect_view()}
            </select>
            <button class="btn secondary" type="submit">"Add link"</button>
        </form>
    }
}
