use crate::api::{admin_sections, legal_pages, save_legal_page, update_section};
use crate::pages::LoadError;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use maison_commerce::prelude::*;

#[component]
pub fn ContentPanel() -> impl IntoView {
    view! {
        <HomeSections/>
        <LegalPages/>
    }
}

fn section_title(section: &HomeSection) -> String {
    match section {
        HomeSection::Hero { headline, .. } => headline.clone(),
        HomeSection::ProductCarousel { title, collection, .. } => format!("{title} ({collection})"),
        HomeSection::Banner { title, image_url, .. } => title.clone().unwrap_or_else(|| image_url.clone()),
        HomeSection::Testimonials { title } | HomeSection::SocialFeed { title, .. } => title.clone(),
    }
}

#[component]
fn HomeSections() -> impl IntoView {
    let shop = use_shop();
    let sections = Resource::new(|| (), |_| admin_sections());

    let toggle = move |entry: HomeSectionEntry| {
        spawn_local(async move {
            let enabled = !entry.enabled;
            match update_section(entry.id, entry.section, enabled).await {
                Ok(_) => sections.refetch(),
                Err(e) => shop.toasts.error(error_message(&e)),
            }
        });
    };

    view! {
        <h2>"Homepage sections"</h2>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || sections.get().map(|result| match result {
                Ok(mut entries) => {
                    entries.sort_by_key(|e| e.position);
                    view! {
                        <table class="admin-table">
                            <thead><tr><th>"#"</th><th>"Type"</th><th>"Title"</th><th>"Shown"</th></tr></thead>
                            <tbody>
                                {entries.into_iter().map(|entry| view! {
                                    <tr class:disabled=!entry.enabled>
                                        <td>{entry.position + 1}</td>
                                        <td>{entry.section.kind()}</td>
                                        <td>{section_title(&entry.section)}</td>
                                        <td>
                                            <input
                                                type="checkbox"
                                                prop:checked=entry.enabled
                                                on:change={
                                                    let entry = entry.clone();
                                                    move |_| toggle(entry.clone())
                                                }
                                            />
                                        </td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_any()
                }
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn LegalPages() -> impl IntoView {
    let shop = use_shop();
    let pages = Resource::new(|| (), |_| legal_pages());
    let draft = RwSignal::new(LegalPageInput::default());
    let saving = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = draft.get_untracked();
        if let Err(errors) = input.validate() {
            for e in errors {
                shop.toasts.error(e.to_string());
            }
            return;
        }
        saving.set(true);
        spawn_local(async move {
            match save_legal_page(input).await {
                Ok(page) => {
                    shop.toasts.success(format!("Saved {}", page.title));
                    pages.refetch();
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            saving.set(false);
        });
    };

    view! {
        <h2>"Legal pages"</h2>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || pages.get().map(|result| match result {
                Ok(list) => view! {
                    <ul class="legal-list">
                        {list.into_iter().map(|page| {
                            let input = LegalPageInput {
                                slug: page.slug.clone(),
                                title: page.title.clone(),
                                body: page.body,
                            };
                            view! {
                                <li>
                                    <a href=format!("/legal/{}", page.slug)>{page.title}</a>
                                    <span class="muted">{format!(" updated {}", page.updated_at.format("%d %b %Y"))}</span>
                                    <button class="link" on:click=move |_| draft.set(input.clone())>"Edit"</button>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                }.into_any(),
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
        <form class="admin-form" on:submit=submit>
            <label>
                "Slug"
                <input
                    placeholder="privacy-policy"
                    prop:value=move || draft.with(|d| d.slug.clone())
                    on:input=move |ev| draft.update(|d| d.slug = event_target_value(&ev))
                />
            </label>
            <label>
                "Title"
                <input
                    prop:value=move || draft.with(|d| d.title.clone())
                    on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                />
            </label>
            <label>
                "Body (Markdown)"
                <textarea
                    rows="16"
                    prop:value=move || draft.with(|d| d.body.clone())
                    on:input=move |ev| draft.update(|d| d.body = event_target_value(&ev))
                ></textarea>
            </label>
            <div class="form-actions">
                <button class="btn" type="submit" disabled=saving>"Save page"</button>
                <button class="btn secondary" type="button" on:click=move |_| draft.set(LegalPageInput::default())>
                    "New page"
                </button>
            </div>
        </form>
    }
}
