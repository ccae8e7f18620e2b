use leptos::prelude::*;

/// Dialog over a dimmed backdrop. Closes on backdrop click, the close
/// button or Escape.
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(into)] title: String,
    children: ChildrenFn,
) -> impl IntoView {
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        let handle = window_event_listener(leptos::ev::keydown, move |ev| {
            if ev.key() == "Escape" {
                on_close.run(());
            }
        });
        on_cleanup(move || handle.remove());
    });

    let title = StoredValue::new(title);

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
            <div class="modal" role="dialog" aria-modal="true" aria-label=title.get_value()>
                <header class="modal-header">
                    <h2>{title.get_value()}</h2>
                    <button class="modal-close" aria-label="Close" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </header>
                <div class="modal-body">{children()}</div>
            </div>
        </Show>
    }
}
