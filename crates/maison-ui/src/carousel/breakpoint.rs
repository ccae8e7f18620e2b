//! Viewport width to cards-per-page.

use serde::{Deserialize, Serialize};

/// Widths at or above this use the `md` count.
pub const MD_MIN_WIDTH: f64 = 768.0;
/// Widths at or above this use the `lg` count.
pub const LG_MIN_WIDTH: f64 = 1024.0;

const DEFAULT_BASE: usize = 1;
const DEFAULT_MD: usize = 4;

/// Per-breakpoint counts. Missing entries fall back to the defaults:
/// base 1, md 4, lg whatever md resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    #[serde(default)]
    pub base: Option<usize>,
    #[serde(default)]
    pub md: Option<usize>,
    #[serde(default)]
    pub lg: Option<usize>,
}

/// How many cards a carousel shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardsPerView {
    /// Same count at every width.
    Fixed(usize),
    Responsive(Breakpoints),
}

impl Default for CardsPerView {
    fn default() -> Self {
        CardsPerView::Responsive(Breakpoints::default())
    }
}

impl From<usize> for CardsPerView {
    fn from(count: usize) -> Self {
        CardsPerView::Fixed(count)
    }
}

impl From<Breakpoints> for CardsPerView {
    fn from(breakpoints: Breakpoints) -> Self {
        CardsPerView::Responsive(breakpoints)
    }
}

impl CardsPerView {
    pub fn responsive(base: usize, md: usize, lg: usize) -> Self {
        CardsPerView::Responsive(Breakpoints {
            base: Some(base),
            md: Some(md),
            lg: Some(lg),
        })
    }

    /// Cards per page at `width` pixels. Never less than one.
    pub fn resolve(&self, width: f64) -> usize {
        let count = match self {
            CardsPerView::Fixed(count) => *count,
            CardsPerView::Responsive(bp) => {
                let md = bp.md.unwrap_or(DEFAULT_MD);
                if width >= LG_MIN_WIDTH {
                    bp.lg.unwrap_or(md)
                } else if width >= MD_MIN_WIDTH {
                    md
                } else {
                    bp.base.unwrap_or(DEFAULT_BASE)
                }
            }
        };
        count.max(1)
    }

    /// Count used before the viewport is known (server render).
    pub fn initial(&self) -> usize {
        self.resolve(LG_MIN_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cpv = CardsPerView::default();
        assert_eq!(cpv.resolve(375.0), 1);
        assert_eq!(cpv.resolve(768.0), 4);
        assert_eq!(cpv.resolve(1440.0), 4);
    }

    #[test]
    fn test_lg_falls_back_to_md() {
        let cpv = CardsPerView::Responsive(Breakpoints {
            md: Some(3),
            ..Default::default()
        });
        assert_eq!(cpv.resolve(1023.0), 3);
        assert_eq!(cpv.resolve(1024.0), 3);
    }

    #[test]
    fn test_boundaries() {
        let cpv = CardsPerView::responsive(1, 2, 4);
        assert_eq!(cpv.resolve(767.9), 1);
        assert_eq!(cpv.resolve(768.0), 2);
        assert_eq!(cpv.resolve(1023.0), 2);
        assert_eq!(cpv.resolve(1024.0), 4);
    }

    #[test]
    fn test_zero_is_clamped() {
        assert_eq!(CardsPerView::Fixed(0).resolve(500.0), 1);
        assert_eq!(CardsPerView::responsive(0, 0, 0).resolve(2000.0), 1);
    }

    #[test]
    fn test_deserialize_either_form() {
        let fixed: CardsPerView = serde_json::from_str("3").unwrap();
        assert_eq!(fixed, CardsPerView::Fixed(3));
        let responsive: CardsPerView = serde_json::from_str(r#"{"base": 2, "lg": 5}"#).unwrap();
        assert_eq!(responsive.resolve(1200.0), 5);
        assert_eq!(responsive.resolve(900.0), 4);
    }
}
