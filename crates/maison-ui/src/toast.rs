//! Transient notifications.

use crate::carousel::component::now_ms;
use leptos::prelude::*;
use std::time::Duration;

/// How long a toast stays up.
pub const DEFAULT_TTL_MS: u64 = 4_000;
/// Oldest toasts are dropped beyond this.
pub const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
    ttl_ms: u64,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

impl ToastQueue {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            ttl_ms,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>, now: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            expires_at: now.saturating_add(self.ttl_ms),
        });
        if self.toasts.len() > MAX_TOASTS {
            self.toasts.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop expired toasts; returns how many went.
    pub fn prune(&mut self, now: u64) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before - self.toasts.len()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Earliest expiry among live toasts.
    pub fn next_expiry(&self) -> Option<u64> {
        self.toasts.iter().map(|t| t.expires_at).min()
    }
}

/// Handle pages use to raise toasts. Provided once by [`Toaster`].
#[derive(Debug, Clone, Copy)]
pub struct Toasts(RwSignal<ToastQueue>);

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let message = message.into();
        if kind == ToastKind::Error {
            tracing::warn!(%message, "error toast");
        }
        self.0.update(|q| {
            q.push(kind, message, now_ms());
        });
    }
}

/// The toast handle from context. Falls back to a detached queue when no
/// [`Toaster`] is mounted, so components still render in isolation.
pub fn use_toasts() -> Toasts {
    use_context::<Toasts>().unwrap_or_else(|| Toasts(RwSignal::new(ToastQueue::default())))
}

/// Renders the toast stack and provides [`Toasts`] to descendants.
#[component]
pub fn Toaster(children: Children) -> impl IntoView {
    let queue = RwSignal::new(ToastQueue::default());
    provide_context(Toasts(queue));

    Effect::new(move |_| {
        let Some(at) = queue.with(ToastQueue::next_expiry) else {
            return;
        };
        let delay = Duration::from_millis(at.saturating_sub(now_ms()));
        if let Ok(handle) = set_timeout_with_handle(
            move || {
                queue.update(|q| {
                    q.prune(now_ms().max(at));
                });
            },
            delay,
        ) {
            on_cleanup(move || handle.clear());
        }
    });

    view! {
        {children()}
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || queue.with(|q| q.toasts().to_vec())
                key=|toast| toast.id
                let:toast
            >
                <div class=toast.kind.class()>
                    <span>{toast.message.clone()}</span>
                    <button
                        class="toast-close"
                        aria-label="Dismiss"
                        on:click=move |_| queue.update(|q| q.dismiss(toast.id))
                    >
                        "×"
                    </button>
                </div>
            </For>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let mut q = ToastQueue::new(1_000);
        q.push(ToastKind::Info, "a", 0);
        q.push(ToastKind::Error, "b", 500);
        assert_eq!(q.next_expiry(), Some(1_000));
        assert_eq!(q.prune(999), 0);
        assert_eq!(q.prune(1_000), 1);
        assert_eq!(q.toasts()[0].message, "b");
        assert_eq!(q.prune(2_000), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut q = ToastQueue::default();
        for i in 0..6 {
            q.push(ToastKind::Success, format!("t{i}"), 0);
        }
        assert_eq!(q.toasts().len(), MAX_TOASTS);
        assert_eq!(q.toasts()[0].message, "t2");
    }

    #[test]
    fn test_dismiss() {
        let mut q = ToastQueue::default();
        let id = q.push(ToastKind::Info, "x", 0);
        q.dismiss(id);
        assert!(q.is_empty());
    }
}
