use crate::api::{admin_users, delete_user, update_user_role};
use crate::pages::LoadError;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use maison_commerce::prelude::*;
use maison_ui::components::Pagination;
use std::str::FromStr;

#[component]
pub fn UsersPanel() -> impl IntoView {
    let shop = use_shop();
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(1u32);
    let users = Resource::new(
        move || (search.get(), page.get()),
        |(q, p)| admin_users(Some(q), p),
    );
    let total_pages = Signal::derive(move || users.get().and_then(Result::ok).map(|p| p.total_pages()).unwrap_or(1));
    let me = move || shop.store.with(|s| s.auth.user().map(|u| u.id.clone()));

    let set_role = move |id: UserId, role: Role| {
        spawn_local(async move {
            match update_user_role(id, role).await {
                Ok(user) => shop.toasts.success(format!("{} is now {}", user.name, user.role.as_str())),
                Err(e) => {
                    shop.toasts.error(error_message(&e));
                    users.refetch();
                }
            }
        });
    };
    let remove = move |id: UserId| {
        spawn_local(async move {
            match delete_user(id).await {
                Ok(()) => users.refetch(),
                Err(e) => shop.toasts.error(error_message(&e)),
            }
        });
    };

    view! {
        <h2>"Users"</h2>
        <input
            type="search"
            placeholder="Search by name or email"
            on:change=move |ev| {
                search.set(event_target_value(&ev));
                page.set(1);
            }
        />
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || users.get().map(|result| match result {
                Ok(list) => view! {
                    <table class="admin-table">
                        <thead><tr><th>"Name"</th><th>"Email"</th><th>"Role"</th><th></th></tr></thead>
                        <tbody>
                            {list.items.into_iter().map(|user| {
                                let is_me = me().as_ref() == Some(&user.id);
                                let (role_id, delete_id) = (user.id.clone(), user.id.clone());
                                let current = user.role;
                                view! {
                                    <tr>
                                        <td>{user.name}</td>
                                        <td>{user.email}</td>
                                        <td>
                                            <select disabled=is_me on:change=move |ev| {
                                                if let Ok(role) = Role::from_str(&event_target_value(&ev)) {
                                                    set_role(role_id.clone(), role);
                                                }
                                            }>
                                                {[Role::Customer, Role::Admin].into_iter().map(|r| view! {
                                                    <option value=r.as_str() selected=r == current>{r.as_str()}</option>
                                                }).collect_view()}
                                            </select>
                                        </td>
                                        <td>
                                            {(!is_me).then(|| view! {
                                                <button class="link danger" on:click=move |_| remove(delete_id.clone())>"Delete"</button>
                                            })}
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_any(),
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
        <Pagination page=page total_pages=total_pages on_change=Callback::new(move |p: u32| page.set(p))/>
    }
}
