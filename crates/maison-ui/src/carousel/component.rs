//! The `Carousel` component: a [`Pager`] wired to the DOM.

use super::breakpoint::CardsPerView;
use super::pager::{Pager, PagerOptions, DEFAULT_GAP_PX, DEFAULT_INTERVAL_MS};
use leptos::leptos_dom::helpers::{TimeoutHandle, WindowListenerHandle};
use leptos::prelude::*;
use std::time::Duration;

/// Wall-clock milliseconds; works in the browser and on the server.
pub(crate) fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

fn viewport_width() -> Option<f64> {
    window().inner_width().ok().and_then(|w| w.as_f64())
}

/// How many dots the pager needs. Changes only with the item count or
/// cards per page, so navigation does not rebuild the dots.
pub(crate) fn dot_count(pager: RwSignal<Pager>) -> Memo<usize> {
    Memo::new(move |_| pager.with(Pager::total_positions))
}

/// A browser registration that must be undone: an event listener or a
/// pending timeout.
pub(crate) trait Release {
    fn release(self);
}

impl Release for WindowListenerHandle {
    fn release(self) {
        self.remove();
    }
}

impl Release for TimeoutHandle {
    fn release(self) {
        self.clear();
    }
}

/// Undo `handle` when the current owner is cleaned up: on an effect's
/// next run, or when the component unmounts.
pub(crate) fn release_on_cleanup<H: Release + Send + Sync + 'static>(handle: H) {
    on_cleanup(move || handle.release());
}

/// Responsive, autoplaying carousel over `items`.
///
/// Shows `cards_per_view` items at once (resolved against the viewport and
/// recomputed on resize). Arrows and dots appear only when there are more
/// items than fit.
#[component]
pub fn Carousel<T, F, IV>(
    items: Vec<T>,
    /// Renders one item.
    render: F,
    #[prop(optional, into)] cards_per_view: Option<CardsPerView>,
    #[prop(default = true)] auto_play: bool,
    #[prop(default = DEFAULT_INTERVAL_MS)] interval: u64,
    #[prop(optional)] max_card_width: Option<f64>,
    #[prop(default = DEFAULT_GAP_PX)] gap: f64,
    #[prop(optional, into)] label: Option<String>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> IV + Clone + Send + Sync + 'static,
    IV: IntoView + 'static,
{
    let config = cards_per_view.unwrap_or_default();
    let options = PagerOptions {
        auto_play,
        interval_ms: interval,
        gap_px: gap,
        max_card_width,
    };
    let pager = RwSignal::new(Pager::new(items.len(), config.initial(), options, now_ms()));
    let items = StoredValue::new(items);

    // Breakpoint tracking. Runs once after mount; the listener goes away
    // with the component.
    Effect::new(move |_| {
        let sync = move || {
            if let Some(width) = viewport_width() {
                pager.update(|p| p.set_cards_per_page(config.resolve(width), now_ms()));
            }
        };
        sync();
        release_on_cleanup(window_event_listener(leptos::ev::resize, move |_| sync()));
    });

    // One live timeout at a time: each rerun clears the previous one.
    Effect::new(move |_| {
        let Some(due) = pager.with(Pager::next_deadline) else {
            return;
        };
        let delay = Duration::from_millis(due.saturating_sub(now_ms()));
        match set_timeout_with_handle(
            move || {
                pager.update(|p| {
                    p.tick(now_ms().max(due));
                });
            },
            delay,
        ) {
            Ok(handle) => release_on_cleanup(handle),
            Err(e) => tracing::warn!(error = ?e, "carousel autoplay not scheduled"),
        }
    });

    let track = move || {
        let (indices, style, animates) =
            pager.with(|p| (p.visible_indices(), p.item_width().to_style(), p.animates()));
        let class = if animates {
            "carousel-item carousel-item-enter"
        } else {
            "carousel-item"
        };
        indices
            .into_iter()
            .filter_map(|i| items.with_value(|items| items.get(i).cloned()))
            .map(|item| {
                view! { <div class=class style=style.clone()>{render(item)}</div> }
            })
            .collect_view()
    };

    let positions = dot_count(pager);
    let dots = move || {
        (0..positions.get())
            .map(|dot| {
                view! {
                    <button
                        class="carousel-dot"
                        class:active=move || pager.with(|p| p.is_dot_active(dot))
                        aria-label=format!("Go to slide {}", dot + 1)
                        on:click=move |_| pager.update(|p| p.go_to(dot, now_ms()))
                    ></button>
                }
            })
            .collect_view()
    };

    view! {
        <section class="carousel" aria-roledescription="carousel" aria-label=label>
            <div class="carousel-track" style=format!("display: flex; gap: {gap}px;")>
                {track}
            </div>
            <Show when=move || pager.with(Pager::shows_controls)>
                <button
                    class="carousel-arrow carousel-prev"
                    aria-label="Previous"
                    on:click=move |_| pager.update(|p| p.prev(now_ms()))
                >
                    "‹"
                </button>
                <button
                    class="carousel-arrow carousel-next"
                    aria-label="Next"
                    on:click=move |_| pager.update(|p| p.next(now_ms()))
                >
                    "›"
                </button>
                <div class="carousel-dots">{dots}</div>
            </Show>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandle(Arc<AtomicUsize>);

    impl Release for CountingHandle {
        fn release(self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_handle_released_once_on_cleanup() {
        let released = Arc::new(AtomicUsize::new(0));
        let owner = Owner::new();
        owner.with(|| release_on_cleanup(CountingHandle(released.clone())));
        assert_eq!(released.load(Ordering::SeqCst), 0);

        owner.cleanup();
        assert_eq!(released.load(Ordering::SeqCst), 1);
        owner.cleanup();
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unmount_releases_every_run() {
        let released = Arc::new(AtomicUsize::new(0));
        let component = Owner::new();
        // Resize listener and autoplay timeout, each in its own effect scope.
        let runs: Vec<Owner> = (0..2)
            .map(|_| {
                let run = component.with(Owner::new);
                run.with(|| release_on_cleanup(CountingHandle(released.clone())));
                run
            })
            .collect();
        assert_eq!(released.load(Ordering::SeqCst), 0);

        component.cleanup();
        assert_eq!(released.load(Ordering::SeqCst), 2);
        drop(runs);
        assert_eq!(released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dot_count_follows_layout_not_position() {
        let owner = Owner::new();
        owner.with(|| {
            let pager = RwSignal::new(Pager::new(10, 4, PagerOptions::default(), 0));
            let dots = dot_count(pager);
            assert_eq!(dots.get(), 7);

            pager.update(|p| p.next(1));
            pager.update(|p| p.go_to(5, 2));
            assert_eq!(dots.get(), 7);

            pager.update(|p| p.set_cards_per_page(5, 3));
            assert_eq!(dots.get(), 6);
        });
    }
}
