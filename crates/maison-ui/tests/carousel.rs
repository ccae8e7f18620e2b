use maison_ui::carousel::{CardsPerView, Pager, PagerOptions};
use quickcheck_macros::quickcheck;

const INTERVAL: u64 = 5_000;

fn pager(len: usize, cpp: usize) -> Pager {
    Pager::new(len, cpp, PagerOptions::default(), 0)
}

/// Small sizes keep the interesting N vs cards-per-page crossovers common.
fn sizes(n: u8, cpp: u8) -> (usize, usize) {
    (usize::from(n % 12), usize::from(cpp % 6) + 1)
}

#[quickcheck]
fn rendered_count_is_min_of_cpp_and_len(n: u8, cpp: u8, start: u8) -> bool {
    let (n, cpp) = sizes(n, cpp);
    let mut p = pager(n, cpp);
    p.go_to(usize::from(start), 0);
    p.visible_indices().len() == cpp.min(n)
}

#[quickcheck]
fn index_stays_in_range(n: u8, cpp: u8, ops: Vec<u8>) -> bool {
    let (n, cpp) = sizes(n, cpp);
    let mut p = pager(n, cpp);
    let mut now = 0;
    for op in ops {
        now += 1_000;
        match op % 4 {
            0 => p.next(now),
            1 => p.prev(now),
            2 => p.go_to(usize::from(op), now),
            _ => {
                now += INTERVAL;
                p.tick(now);
            }
        }
        let in_range = if n == 0 { p.index() == 0 } else { p.index() < n };
        if !in_range || p.visible_indices().iter().any(|&i| i >= n) {
            return false;
        }
    }
    true
}

#[quickcheck]
fn next_and_prev_wrap(n: u8) -> bool {
    let n = usize::from(n % 20) + 1;
    let mut p = pager(n, 1);
    p.go_to(n - 1, 0);
    p.next(0);
    let wrapped_forward = p.index() == 0;
    p.prev(0);
    wrapped_forward && p.index() == n - 1
}

#[quickcheck]
fn no_controls_or_timer_when_everything_fits(n: u8, extra: u8) -> bool {
    let n = usize::from(n % 10);
    let cpp = (n + usize::from(extra % 4)).max(1);
    let mut p = pager(n, cpp);
    let quiet = !p.shows_controls() && !p.animates() && p.next_deadline().is_none();
    let moved = p.tick(u64::MAX);
    quiet && !moved
}

#[quickcheck]
fn manual_navigation_postpones_autoplay(n: u8, cpp: u8, at: u16, probe: u16) -> bool {
    let (n, cpp) = sizes(n, cpp);
    let n = n.max(cpp + 1);
    let mut p = pager(n, cpp);
    let at = u64::from(at);
    p.prev(at);
    let before = p.index();
    let probe = at + u64::from(probe) % INTERVAL;
    let ticked_early = p.tick(probe);
    !ticked_early && p.index() == before && p.tick(at + INTERVAL)
}

#[quickcheck]
fn resize_updates_cpp_and_controls(n: u8, base: u8, md: u8, lg: u8, widths: Vec<u16>) -> bool {
    let n = usize::from(n % 12);
    let config = CardsPerView::responsive(usize::from(base % 6), usize::from(md % 6), usize::from(lg % 6));
    let mut p = Pager::new(n, config.initial(), PagerOptions::default(), 0);
    widths.into_iter().all(|w| {
        let cpp = config.resolve(f64::from(w));
        p.set_cards_per_page(cpp, 0);
        p.cards_per_page() == cpp && p.cards_per_page() >= 1 && p.shows_controls() == (n > cpp)
    })
}

#[test]
fn test_six_items_at_lg() {
    let config = CardsPerView::responsive(1, 2, 4);
    let mut p = Pager::new(6, config.resolve(1280.0), PagerOptions::default(), 0);
    assert_eq!(p.visible_indices(), vec![0, 1, 2, 3]);

    p.next(0);
    assert_eq!(p.visible_indices(), vec![1, 2, 3, 4]);

    let mut p = Pager::new(6, 4, PagerOptions::default(), 0);
    let mut seen = vec![p.index()];
    for _ in 0..7 {
        p.next(0);
        seen.push(p.index());
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 0, 1]);
}

#[test]
fn test_fewer_items_than_cards() {
    let options = PagerOptions {
        max_card_width: Some(320.0),
        ..Default::default()
    };
    let p = Pager::new(2, 4, options, 0);
    assert_eq!(p.visible_indices(), vec![0, 1]);
    assert!(!p.shows_controls());
    assert_eq!(p.total_positions(), 0);
    assert_eq!(p.item_width().max_px, Some(320.0));
    assert!(p.item_width().to_style().contains("max-width: 320px"));
}

#[test]
fn test_autoplay_timeline() {
    let mut p = Pager::new(5, 3, PagerOptions::default(), 0);
    assert!(!p.tick(4_999));
    assert!(p.tick(5_000));
    assert_eq!(p.index(), 1);

    let mut p = Pager::new(5, 3, PagerOptions::default(), 0);
    p.prev(4_000);
    assert_eq!(p.index(), 4);
    assert!(!p.tick(5_000));
    assert!(!p.tick(8_999));
    assert!(p.tick(9_000));
    assert_eq!(p.index(), 0);
}

#[test]
fn test_controls_follow_resize() {
    let config = CardsPerView::responsive(1, 3, 5);
    let mut p = Pager::new(4, config.resolve(1440.0), PagerOptions::default(), 0);
    assert!(!p.shows_controls());
    assert_eq!(p.next_deadline(), None);

    p.set_cards_per_page(config.resolve(900.0), 100);
    assert!(p.shows_controls());
    assert_eq!(p.next_deadline(), Some(5_100));

    p.set_cards_per_page(config.resolve(1440.0), 200);
    assert!(!p.shows_controls());
    assert_eq!(p.next_deadline(), None);
}
