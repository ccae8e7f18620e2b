use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

impl StarFill {
    fn class(&self) -> &'static str {
        match self {
            StarFill::Full => "star star-full",
            StarFill::Half => "star star-half",
            StarFill::Empty => "star star-empty",
        }
    }
}

/// Stars for `rating` out of `max`, rounded to the nearest half.
pub fn stars(rating: f32, max: u8) -> Vec<StarFill> {
    let halves = if rating.is_finite() {
        (rating.clamp(0.0, f32::from(max)) * 2.0).round() as u32
    } else {
        0
    };
    (0..u32::from(max))
        .map(|i| match halves.saturating_sub(i * 2) {
            0 => StarFill::Empty,
            1 => StarFill::Half,
            _ => StarFill::Full,
        })
        .collect()
}

#[component]
pub fn RatingStars(
    rating: f32,
    #[prop(default = 5)] max: u8,
    /// Review count shown after the stars.
    #[prop(optional)]
    count: Option<u32>,
) -> impl IntoView {
    let label = format!("Rated {rating:.1} out of {max}");
    view! {
        <span class="rating" role="img" aria-label=label>
            {stars(rating, max)
                .into_iter()
                .map(|fill| view! { <span class=fill.class()>"★"</span> })
                .collect_view()}
            {count.map(|n| view! { <span class="rating-count">{format!("({n})")}</span> })}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use StarFill::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(3.5, 5), vec![Full, Full, Full, Half, Empty]);
        assert_eq!(stars(4.8, 5), vec![Full; 5]);
        assert_eq!(stars(4.2, 5), vec![Full, Full, Full, Full, Empty]);
        assert_eq!(stars(-1.0, 3), vec![Empty; 3]);
        assert_eq!(stars(f32::NAN, 2), vec![Empty; 2]);
    }
}
