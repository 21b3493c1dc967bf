//! Viewport intersection tracking for listing cards.
//!
//! Ids enter a listing's visible set the first time enough of the card is on
//! screen and stay there for the rest of the page's life, so the enter
//! transition plays once per card.

use std::collections::BTreeSet;

/// Minimum visible fraction of a card before it counts as seen.
pub const VISIBILITY_THRESHOLD: f32 = 0.1;

/// Axis-aligned rectangle in page pixels, y down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Fraction of `target` inside `viewport`, in [0, 1].
pub fn intersection_ratio(target: Rect, viewport: Rect) -> f32 {
    let area = target.area();
    if area <= 0.0 {
        return 0.0;
    }
    let w = (target.right().min(viewport.right()) - target.x.max(viewport.x)).max(0.0);
    let h = (target.bottom().min(viewport.bottom()) - target.y.max(viewport.y)).max(0.0);
    (w * h / area).clamp(0.0, 1.0)
}

/// Ids that have been seen at least once. Never shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleItemSet {
    ids: BTreeSet<u32>,
}

impl VisibleItemSet {
    /// Returns true if `id` was not already present.
    pub fn insert(&mut self, id: u32) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }
}

/// Observes a fixed set of item ids for one listing.
#[derive(Debug, Clone)]
pub struct ListingObserver {
    threshold: f32,
    observed: BTreeSet<u32>,
    visible: VisibleItemSet,
    attached: bool,
}

impl Default for ListingObserver {
    fn default() -> Self {
        Self::new(VISIBILITY_THRESHOLD)
    }
}

impl ListingObserver {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            observed: BTreeSet::new(),
            visible: VisibleItemSet::default(),
            attached: true,
        }
    }

    /// Replace the observed ids. Already-visible ids stay visible.
    pub fn observe<I: IntoIterator<Item = u32>>(&mut self, ids: I) {
        self.observed = ids.into_iter().collect();
        self.attached = true;
    }

    /// Feed one intersection sample. Returns true when `id` becomes visible
    /// for the first time.
    pub fn sample(&mut self, id: u32, target: Rect, viewport: Rect) -> bool {
        if !self.attached || !self.observed.contains(&id) {
            return false;
        }
        let ratio = intersection_ratio(target, viewport);
        if ratio > 0.0 && ratio >= self.threshold {
            return self.visible.insert(id);
        }
        false
    }

    /// Stop observing. Later samples are ignored.
    pub fn detach(&mut self) {
        self.attached = false;
        self.observed.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn visible(&self) -> &VisibleItemSet {
        &self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 800.0,
        height: 600.0,
    };

    fn card_at(y: f32) -> Rect {
        Rect::new(100.0, y, 300.0, 200.0)
    }

    mod ratio {
        use super::*;

        #[test]
        fn fully_inside_is_one() {
            assert_eq!(intersection_ratio(card_at(100.0), VIEWPORT), 1.0);
        }

        #[test]
        fn fully_outside_is_zero() {
            assert_eq!(intersection_ratio(card_at(900.0), VIEWPORT), 0.0);
            assert_eq!(intersection_ratio(card_at(-300.0), VIEWPORT), 0.0);
        }

        #[test]
        fn half_inside_is_half() {
            let r = intersection_ratio(card_at(500.0), VIEWPORT);
            assert!((r - 0.5).abs() < 1e-6);
        }

        #[test]
        fn degenerate_target_is_zero() {
            assert_eq!(intersection_ratio(Rect::new(0.0, 0.0, 0.0, 10.0), VIEWPORT), 0.0);
        }
    }

    #[test]
    fn id_stays_visible_after_scrolling_away() {
        let mut obs = ListingObserver::default();
        obs.observe([1, 2, 3]);

        assert!(obs.sample(1, card_at(100.0), VIEWPORT));
        assert!(obs.visible().contains(1));

        // Scrolled past: card is now above the viewport.
        assert!(!obs.sample(1, card_at(-400.0), VIEWPORT));
        assert!(obs.visible().contains(1));

        // Coming back does not re-trigger.
        assert!(!obs.sample(1, card_at(100.0), VIEWPORT));
        assert_eq!(obs.visible().len(), 1);
    }

    #[test]
    fn below_threshold_does_not_count() {
        let mut obs = ListingObserver::default();
        obs.observe([1]);
        // 10px of a 200px card = 5%
        assert!(!obs.sample(1, card_at(590.0), VIEWPORT));
        // 30px = 15%
        assert!(obs.sample(1, card_at(570.0), VIEWPORT));
    }

    #[test]
    fn unobserved_ids_are_ignored() {
        let mut obs = ListingObserver::default();
        obs.observe([1]);
        assert!(!obs.sample(7, card_at(0.0), VIEWPORT));
        assert!(obs.visible().is_empty());
    }

    #[test]
    fn detached_observer_ignores_samples() {
        let mut obs = ListingObserver::default();
        obs.observe([1, 2]);
        obs.sample(1, card_at(0.0), VIEWPORT);
        obs.detach();

        assert!(!obs.sample(2, card_at(0.0), VIEWPORT));
        assert!(obs.visible().contains(1));
        assert!(!obs.visible().contains(2));
    }

    #[test]
    fn reobserving_keeps_seen_ids() {
        let mut obs = ListingObserver::default();
        obs.observe([1, 2, 3]);
        obs.sample(2, card_at(0.0), VIEWPORT);

        obs.observe(1..=11);
        assert!(obs.visible().contains(2));
        assert!(obs.sample(9, card_at(0.0), VIEWPORT));
    }
}
