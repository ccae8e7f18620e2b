use super::rating::RatingStars;
use leptos::prelude::*;
use maison_commerce::testimonial::Testimonial;

#[component]
pub fn TestimonialCard(testimonial: Testimonial) -> impl IntoView {
    let initials = testimonial.initials();
    let avatar = testimonial.avatar_url.clone();
    let name = testimonial.author_name.clone();

    view! {
        <figure class="testimonial-card">
            <RatingStars rating=f32::from(testimonial.rating)/>
            <blockquote>{testimonial.quote}</blockquote>
            <figcaption>
                {match avatar {
                    Some(src) => view! { <img class="avatar" src=src alt=name.clone()/> }.into_any(),
                    None => view! { <span class="avatar avatar-initials">{initials}</span> }.into_any(),
                }}
                <span class="testimonial-author">{name}</span>
                {testimonial.author_location.map(|loc| view! { <span class="testimonial-location">{loc}</span> })}
            </figcaption>
        </figure>
    }
}
