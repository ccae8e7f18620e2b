//! Policy pages edited from the admin dashboard.

use super::LoadError;
use crate::api::get_legal_page;
use crate::state::error_message;
use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_params_map;

/// Block structure of a Markdown body: blank lines separate blocks and
/// `#` blocks become headings. Inline markup is shown as written.
fn blocks(body: &str) -> Vec<(bool, String)> {
    body.split("\n\n")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(|b| match b.strip_prefix('#') {
            Some(heading) => (true, heading.trim_start_matches('#').trim().to_string()),
            None => (false, b.to_string()),
        })
        .collect()
}

#[component]
pub fn LegalPageView() -> impl IntoView {
    let params = use_params_map();
    let slug = move || params.with(|p| p.get("slug").unwrap_or_default());
    let page = Resource::new(slug, get_legal_page);

    view! {
        <Suspense fallback=|| view! { <p>"Loading..."</p> }>
            {move || page.get().map(|result| match result {
                Ok(Some(page)) => view! {
                    <Title text=page.title.clone()/>
                    <article class="legal-page">
                        <h1>{page.title}</h1>
                        <p class="muted">{format!("Last updated {}", page.updated_at.format("%d %B %Y"))}</p>
                        {blocks(&page.body).into_iter().map(|(heading, text)| {
                            if heading {
                                view! { <h2>{text}</h2> }.into_any()
                            } else {
                                view! { <p>{text}</p> }.into_any()
                            }
                        }).collect_view()}
                    </article>
                }.into_any(),
                Ok(None) => view! { <crate::app::NotFound/> }.into_any(),
                Err(e) => view! { <LoadError message=error_message(&e)/> }.into_any(),
            })}
        </Suspense>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_split_headings_and_paragraphs() {
        let body = "# Returns\n\nItems can be returned within 7 days.\n\n\n## Refunds\n\nRefunds take 5 days.";
        assert_eq!(
            blocks(body),
            vec![
                (true, "Returns".to_string()),
                (false, "Items can be returned within 7 days.".to_string()),
                (true, "Refunds".to_string()),
                (false, "Refunds take 5 days.".to_string()),
            ]
        );
    }
}
