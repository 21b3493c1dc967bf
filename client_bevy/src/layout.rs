//! Page geometry in logical pixels, page coordinates (y grows downward from
//! the top of the page).
//!
//! The UI places every section and card at these rects, and visibility
//! tracking samples the same rects against the scrolled viewport.

use nexora_shared::catalog::{Listing, COURSES, FEATURES};
use nexora_shared::visibility::Rect;

pub const NAV_HEIGHT: f32 = 64.0;
/// Scroll offset past which the nav bar gets a solid background.
pub const SOLID_NAV_SCROLL: f32 = 20.0;

pub const MAX_CONTENT_WIDTH: f32 = 1200.0;
pub const SIDE_PADDING: f32 = 24.0;
pub const SECTION_PADDING: f32 = 80.0;
pub const HEADING_HEIGHT: f32 = 96.0;
pub const CARD_GAP: f32 = 24.0;
pub const TOGGLE_HEIGHT: f32 = 72.0;
pub const CTA_HEIGHT: f32 = 88.0;

pub const HERO_MIN_HEIGHT: f32 = 560.0;
pub const ABOUT_HEIGHT: f32 = 460.0;
pub const CONTACT_HEIGHT: f32 = 860.0;
pub const FOOTER_HEIGHT: f32 = 220.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Hero,
    Features,
    About,
    Internships,
    Courses,
    Contact,
    Footer,
}

impl Section {
    pub const ORDER: [Section; 7] = [
        Section::Hero,
        Section::Features,
        Section::About,
        Section::Internships,
        Section::Courses,
        Section::Contact,
        Section::Footer,
    ];

    /// Sections reachable from the nav bar, in display order.
    pub const NAV_LINKS: [Section; 4] = [
        Section::Internships,
        Section::Courses,
        Section::About,
        Section::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            Section::Hero => "top",
            Section::Features => "features",
            Section::About => "about",
            Section::Internships => "internships",
            Section::Courses => "courses",
            Section::Contact => "contact",
            Section::Footer => "footer",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Features => "Features",
            Section::About => "About",
            Section::Internships => "Internships",
            Section::Courses => "Courses",
            Section::Contact => "Contact",
            Section::Footer => "Footer",
        }
    }

    pub fn listing(self) -> Option<Listing> {
        match self {
            Section::Features => Some(Listing::Features),
            Section::Internships => Some(Listing::Internships),
            Section::Courses => Some(Listing::Courses),
            _ => None,
        }
    }
}

pub fn card_height(listing: Listing) -> f32 {
    match listing {
        Listing::Features => 180.0,
        Listing::Courses => 220.0,
        Listing::Internships => 250.0,
    }
}

pub fn columns_for_width(content_width: f32) -> usize {
    if content_width < 640.0 {
        1
    } else if content_width < 1000.0 {
        2
    } else {
        3
    }
}

pub fn nav_is_solid(scroll: f32) -> bool {
    scroll > SOLID_NAV_SCROLL
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub content_x: f32,
    pub content_width: f32,
    pub columns: usize,
    pub content_height: f32,
    sections: Vec<(Section, Rect)>,
    features: Vec<Rect>,
    internships: Vec<Rect>,
    courses: Vec<Rect>,
    toggle: Rect,
    cta: Rect,
}

impl PageLayout {
    /// Lay the page out for a viewport. `internship_count` is the number of
    /// internship cards currently listed.
    pub fn compute(viewport_width: f32, viewport_height: f32, internship_count: usize) -> Self {
        let viewport_width = viewport_width.max(1.0);
        let viewport_height = viewport_height.max(1.0);
        let content_x = ((viewport_width - MAX_CONTENT_WIDTH) / 2.0).max(SIDE_PADDING);
        let content_width = (viewport_width - 2.0 * content_x).max(1.0);
        let columns = columns_for_width(content_width);

        let mut layout = Self {
            viewport_width,
            viewport_height,
            content_x,
            content_width,
            columns,
            content_height: 0.0,
            sections: Vec::with_capacity(Section::ORDER.len()),
            features: Vec::new(),
            internships: Vec::new(),
            courses: Vec::new(),
            toggle: Rect::default(),
            cta: Rect::default(),
        };

        let mut y = 0.0;
        for section in Section::ORDER {
            let height = match section {
                Section::Hero => viewport_height.max(HERO_MIN_HEIGHT),
                Section::About => ABOUT_HEIGHT,
                Section::Contact => CONTACT_HEIGHT,
                Section::Footer => FOOTER_HEIGHT,
                Section::Features => {
                    let cards = layout.place_cards(Listing::Features, FEATURES.len(), y);
                    layout.cta = Rect::new(
                        content_x,
                        y + cards - SECTION_PADDING,
                        content_width,
                        CTA_HEIGHT,
                    );
                    cards + CTA_HEIGHT
                }
                Section::Courses => layout.place_cards(Listing::Courses, COURSES.len(), y),
                Section::Internships => {
                    let cards = layout.place_cards(Listing::Internships, internship_count, y);
                    layout.toggle = Rect::new(
                        content_x,
                        y + cards - SECTION_PADDING,
                        content_width,
                        TOGGLE_HEIGHT,
                    );
                    cards + TOGGLE_HEIGHT
                }
            };
            layout
                .sections
                .push((section, Rect::new(0.0, y, viewport_width, height)));
            y += height;
        }
        layout.content_height = y;
        layout
    }

    /// Place `count` cards for `listing` in a section starting at `top`.
    /// Returns the section height without any trailing controls.
    fn place_cards(&mut self, listing: Listing, count: usize, top: f32) -> f32 {
        let gap = CARD_GAP;
        let cols = self.columns.max(1);
        let card_w = (self.content_width - gap * (cols - 1) as f32) / cols as f32;
        let card_h = card_height(listing);
        let grid_top = top + SECTION_PADDING + HEADING_HEIGHT;

        let rects: Vec<Rect> = (0..count)
            .map(|i| {
                let col = i % cols;
                let row = i / cols;
                Rect::new(
                    self.content_x + col as f32 * (card_w + gap),
                    grid_top + row as f32 * (card_h + gap),
                    card_w,
                    card_h,
                )
            })
            .collect();

        let rows = count.div_ceil(cols);
        let grid_h = if rows == 0 {
            0.0
        } else {
            rows as f32 * card_h + (rows - 1) as f32 * gap
        };

        match listing {
            Listing::Features => self.features = rects,
            Listing::Internships => self.internships = rects,
            Listing::Courses => self.courses = rects,
        }
        SECTION_PADDING * 2.0 + HEADING_HEIGHT + grid_h
    }

    pub fn section(&self, section: Section) -> Rect {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, r)| *r)
            .unwrap_or_default()
    }

    pub fn cards(&self, listing: Listing) -> &[Rect] {
        match listing {
            Listing::Features => &self.features,
            Listing::Internships => &self.internships,
            Listing::Courses => &self.courses,
        }
    }

    /// "View all" toggle under the internship grid.
    pub fn toggle_rect(&self) -> Rect {
        self.toggle
    }

    /// "Start your journey" button row under the feature grid.
    pub fn cta_rect(&self) -> Rect {
        self.cta
    }

    /// Single-column pages fold the nav links behind a menu button.
    pub fn nav_collapsed(&self) -> bool {
        self.columns == 1
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn clamp_scroll(&self, scroll: f32) -> f32 {
        scroll.clamp(0.0, self.max_scroll())
    }

    /// Scroll offset that brings `section` to the top of the viewport.
    pub fn anchor_offset(&self, section: Section) -> f32 {
        self.clamp_scroll(self.section(section).y)
    }

    /// The visible part of the page at `scroll`.
    pub fn viewport_rect(&self, scroll: f32) -> Rect {
        Rect::new(0.0, scroll, self.viewport_width, self.viewport_height)
    }
}
