use super::SortableList;
use crate::api::{admin_testimonials, delete_testimonial, reorder_testimonials, save_testimonial};
use crate::pages::LoadError;
use crate::state::{error_message, use_shop};
use leptos::prelude::*;
use leptos::task::spawn_local;
use maison_commerce::prelude::*;
use maison_ui::components::Modal;
use maison_ui::ReorderList;

#[component]
pub fn TestimonialsPanel() -> impl IntoView {
    let shop = use_shop();
    let loaded = Resource::new(|| (), |_| admin_testimonials());
    let list = RwSignal::new(ReorderList::new(Vec::<Testimonial>::new()));
    // Which testimonial the editor is open for; `Some(None)` is a new one.
    let editing = RwSignal::new(None::<Option<Testimonial>>);

    Effect::new(move |_| {
        if let Some(Ok(items)) = loaded.get() {
            list.set(ReorderList::new(items));
        }
    });

    let on_save = Callback::new(move |items: Vec<Testimonial>| {
        let ids: Vec<TestimonialId> = items.iter().map(|t| t.id.clone()).collect();
        spawn_local(async move {
            match reorder_testimonials(ids).await {
                Ok(saved) => {
                    list.set(ReorderList::new(saved));
                    shop.toasts.success("Order saved");
                }
                Err(e) => {
                    shop.toasts.error(error_message(&e));
                    loaded.refetch();
                }
            }
        });
    });

    let remove = move |t: Testimonial| {
        spawn_local(async move {
            match delete_testimonial(t.id.clone()).await {
                Ok(()) => {
                    list.update(|l| {
                        let rest = l.items().iter().filter(|i| i.id != t.id).cloned().collect();
                        *l = ReorderList::new(rest);
                    });
                    shop.toasts.success(format!("Removed {}'s testimonial", t.author_name));
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
        });
    };

    view! {
        <h2>"Testimonials"</h2>
        <p class="muted">"Drag to change the order shown on the homepage."</p>
        <button class="btn" on:click=move |_| editing.set(Some(None))>"Add testimonial"</button>
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || loaded.get().and_then(|r| r.err()).map(|e| view! { <LoadError message=error_message(&e)/> })}
        </Suspense>
        <SortableList
            list=list
            key=|t: &Testimonial| t.id.to_string()
            label=|t: &Testimonial| {
                let state = if t.published { "" } else { " (draft)" };
                format!("{}: \u{201c}{}\u{201d}{}", t.author_name, t.quote.chars().take(60).collect::<String>(), state)
            }
            actions=move |t: Testimonial| {
                let edit = t.clone();
                view! {
                    <button class="link" on:click=move |_| editing.set(Some(Some(edit.clone())))>"Edit"</button>
                    <button class="link danger" on:click=move |_| remove(t.clone())>"Delete"</button>
                }
            }
            on_save=on_save
        />
        {move || editing.get().map(|target| view! {
            <TestimonialEditor
                target=target
                on_close=Callback::new(move |_| editing.set(None))
                on_saved=Callback::new(move |saved: Testimonial| {
                    list.update(|l| {
                        let mut items = l.items().to_vec();
                        match items.iter_mut().find(|i| i.id == saved.id) {
                            Some(existing) => *existing = saved,
                            None => items.push(saved),
                        }
                        *l = ReorderList::new(items);
                    });
                    editing.set(None);
                })
            />
        })}
    }
}

#[component]
fn TestimonialEditor(
    target: Option<Testimonial>,
    on_close: Callback<()>,
    on_saved: Callback<Testimonial>,
) -> impl IntoView {
    let shop = use_shop();
    let id = target.as_ref().map(|t| t.id.clone());
    let title = if id.is_some() { "Edit testimonial" } else { "New testimonial" };
    let input = RwSignal::new(target.as_ref().map(TestimonialInput::from).unwrap_or(TestimonialInput {
        rating: 5,
        published: true,
        ..Default::default()
    }));
    let pending = RwSignal::new(false);
    let id = StoredValue::new(id);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let body = input.get_untracked();
        if let Err(errors) = body.validate() {
            for e in errors {
                shop.toasts.error(e.to_string());
            }
            return;
        }
        pending.set(true);
        spawn_local(async move {
            match save_testimonial(id.get_value(), body).await {
                Ok(saved) => {
                    shop.toasts.success("Testimonial saved");
                    on_saved.run(saved);
                }
                Err(e) => shop.toasts.error(error_message(&e)),
            }
            pending.set(false);
        });
    };

    view! {
        <Modal open=Signal::stored(true) on_close=on_close title=title>
            <form class="admin-form" on:submit=submit>
                <label>
                    "Name"
                    <input
                        prop:value=move || input.with(|i| i.author_name.clone())
                        on:input=move |ev| input.update(|i| i.author_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Location"
                    <input
                        prop:value=move || input.with(|i| i.author_location.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            input.update(|i| i.author_location = (!v.trim().is_empty()).then_some(v));
                        }
                    />
                </label>
                <label>
                    "Quote"
                    <textarea
                        prop:value=move || input.with(|i| i.quote.clone())
                        on:input=move |ev| input.update(|i| i.quote = event_target_value(&ev))
                    ></textarea>
                </label>
                <label>
                    "Rating"
                    <input
                        type="number"
                        min="1"
                        max="5"
                        prop:value=move || input.with(|i| i.rating.to_string())
                        on:input=move |ev| {
                            if let Ok(r) = event_target_value(&ev).parse() {
                                input.update(|i| i.rating = r);
                            }
                        }
                    />
                </label>
                <label>
                    "Avatar URL"
                    <input
                        type="url"
                        prop:value=move || input.with(|i| i.avatar_url.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let v = event_target_value(&ev);
                            input.update(|i| i.avatar_url = (!v.trim().is_empty()).then_some(v));
                        }
                    />
                </label>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || input.with(|i| i.published)
                        on:change=move |ev| input.update(|i| i.published = event_target_checked(&ev))
                    />
                    "Published"
                </label>
                <button class="btn" type="submit" disabled=pending>"Save"</button>
            </form>
        </Modal>
    }
}
