//! Feature, internship and course cards with their reveal-on-scroll
//! transition, plus the buttons leading to the application form.

use bevy::prelude::*;
use nexora_shared::catalog::{cards, Listing, APPLY_FORM_URL};
use nexora_shared::visibility::ListingObserver;

use crate::constants::{color_from_hex, Colors};

use super::page::{
    body_text, brand_button, button_frame, content_column, heading, spawn_page, ListingSection,
    PageContent, PageView,
};
use super::UpdateSet;

pub struct ListingsPlugin;

/// Seconds for one card's enter transition.
pub const ENTER_DURATION: f32 = 0.7;
/// Delay added per card position.
pub const ENTER_STAGGER: f32 = 0.1;
/// Pixels a card rises while entering.
pub const ENTER_OFFSET: f32 = 24.0;

#[derive(Resource, Default)]
pub(crate) struct ListingObservers {
    features: ListingObserver,
    internships: ListingObserver,
    courses: ListingObserver,
    sections: Vec<(Entity, Listing)>,
}

impl ListingObservers {
    pub(crate) fn get(&self, listing: Listing) -> &ListingObserver {
        match listing {
            Listing::Features => &self.features,
            Listing::Internships => &self.internships,
            Listing::Courses => &self.courses,
        }
    }

    fn get_mut(&mut self, listing: Listing) -> &mut ListingObserver {
        match listing {
            Listing::Features => &mut self.features,
            Listing::Internships => &mut self.internships,
            Listing::Courses => &mut self.courses,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub(crate) struct ListingCard {
    pub(crate) listing: Listing,
    pub(crate) id: u32,
    /// Position within the listing; drives layout and stagger.
    pub(crate) index: usize,
}

/// When the card's enter transition starts (seconds since startup).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct CardReveal {
    pub(crate) start: Option<f32>,
}

impl CardReveal {
    fn revealed() -> Self {
        Self {
            start: Some(f32::NEG_INFINITY),
        }
    }
}

#[derive(Component)]
struct CardText {
    base: Color,
}

#[derive(Component)]
struct ListingTitle(Listing);

/// Full-width row holding a control below a card grid.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
enum ControlRow {
    ViewAll,
    JoinCta,
}

/// Opens an external page when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub(crate) struct ApplyLink(pub(crate) &'static str);

/// Sent after an [`ApplyLink`] was followed.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkOpened(pub(crate) &'static str);

#[derive(Component)]
struct ViewAllToggle;

#[derive(Component)]
struct ViewAllLabel;

impl Plugin for ListingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ListingObservers>()
            .add_message::<LinkOpened>()
            .add_systems(Startup, spawn_listings.after(spawn_page))
            .add_systems(
                Update,
                (
                    (toggle_view_all, open_apply_links).in_set(UpdateSet::Input),
                    (track_visibility, position_cards, detach_removed_listings)
                        .chain()
                        .in_set(UpdateSet::Page),
                ),
            );
    }
}

/// Transition progress in [0, 1] at `now`.
pub(crate) fn reveal_progress(reveal: CardReveal, now: f32) -> f32 {
    match reveal.start {
        None => 0.0,
        Some(start) if start == f32::NEG_INFINITY => 1.0,
        Some(start) => ((now - start) / ENTER_DURATION).clamp(0.0, 1.0),
    }
}

pub(crate) fn reveal_start(now: f32, index: usize) -> f32 {
    now + index as f32 * ENTER_STAGGER
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

fn listing_title(listing: Listing, show_all: bool) -> &'static str {
    match listing {
        Listing::Internships if show_all => "All Available Internships",
        _ => listing.title(),
    }
}

fn listing_subtitle(listing: Listing) -> &'static str {
    match listing {
        Listing::Features => {
            "We provide comprehensive resources and opportunities to help you \
             build a successful career in your chosen field."
        }
        Listing::Internships => {
            "Launch your career with hands-on experience through our curated \
             internship programs designed for ambitious students."
        }
        Listing::Courses => {
            "Industry-relevant courses designed by experts to help you master \
             key skills and stay ahead in your field."
        }
    }
}

fn toggle_label(show_all: bool) -> &'static str {
    if show_all {
        "Show Featured Only"
    } else {
        "View All Internships"
    }
}

fn spawn_listings(
    mut commands: Commands,
    sections: Query<(Entity, &ListingSection)>,
    content: Query<Entity, With<PageContent>>,
    page: Res<PageView>,
    mut observers: ResMut<ListingObservers>,
) {
    let Ok(content) = content.single() else {
        return;
    };

    for (entity, section) in &sections {
        let listing = section.0;
        commands.entity(entity).with_children(|parent| {
            parent.spawn(content_column()).with_children(|col| {
                col.spawn((
                    heading(listing_title(listing, page.show_all_internships), 36.0),
                    ListingTitle(listing),
                ));
                col.spawn(body_text(listing_subtitle(listing), 17.0));
            });
        });

        let ids = spawn_cards(
            &mut commands,
            content,
            listing,
            page.show_all_internships,
            &observers,
        );
        observers.get_mut(listing).observe(ids);
        observers.sections.push((entity, listing));
    }

    commands
        .spawn((control_row(), ControlRow::ViewAll, ChildOf(content)))
        .with_children(|row| {
            row.spawn((button_frame(), ViewAllToggle))
                .with_children(|button| {
                    button.spawn((
                        Text::new(toggle_label(page.show_all_internships)),
                        TextFont::from_font_size(16.0),
                        TextColor(color_from_hex(Colors::TEXT)),
                        ViewAllLabel,
                    ));
                });
        });

    commands.spawn((
        control_row(),
        ControlRow::JoinCta,
        ChildOf(content),
        children![(
            brand_button("Start Your Journey Today"),
            ApplyLink(APPLY_FORM_URL)
        )],
    ));
}

fn control_row() -> Node {
    Node {
        position_type: PositionType::Absolute,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

/// Spawn one card per item under `content`. Returns the item ids.
fn spawn_cards(
    commands: &mut Commands,
    content: Entity,
    listing: Listing,
    show_all: bool,
    observers: &ListingObservers,
) -> Vec<u32> {
    let seen = observers.get(listing).visible();
    let mut ids = Vec::new();
    for (index, card) in cards(listing, show_all).into_iter().enumerate() {
        ids.push(card.id);
        let revealed = seen.contains(card.id);
        let reveal = if revealed {
            CardReveal::revealed()
        } else {
            CardReveal::default()
        };
        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    padding: UiRect::all(Val::Px(20.0)),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(10.0),
                    border: UiRect::all(Val::Px(1.0)),
                    overflow: Overflow::clip(),
                    ..default()
                },
                BackgroundColor(Color::NONE),
                BorderColor::all(Color::NONE),
                BorderRadius::all(Val::Px(12.0)),
                ListingCard {
                    listing,
                    id: card.id,
                    index,
                },
                reveal,
                ChildOf(content),
            ))
            .with_children(|c| {
                let texts = [
                    (card.title, 20.0, Colors::TEXT),
                    (card.body, 15.0, Colors::TEXT_DIM),
                    (card.meta, 13.0, Colors::BRAND),
                ];
                for (text, size, color) in texts {
                    if text.is_empty() {
                        continue;
                    }
                    c.spawn((
                        Text::new(text),
                        TextFont::from_font_size(size),
                        TextColor(Color::NONE),
                        CardText {
                            base: color_from_hex(color),
                        },
                    ));
                }
                if listing == Listing::Internships {
                    c.spawn((
                        brand_button("Apply Now"),
                        ApplyLink(APPLY_FORM_URL),
                        if revealed {
                            Visibility::Inherited
                        } else {
                            Visibility::Hidden
                        },
                    ));
                }
            });
    }
    ids
}

fn open_apply_links(
    links: Query<(&Interaction, &ApplyLink), Changed<Interaction>>,
    mut opened: MessageWriter<LinkOpened>,
) {
    for (interaction, link) in &links {
        if *interaction == Interaction::Pressed {
            open_external(link.0);
            opened.write(LinkOpened(link.0));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn open_external(url: &str) {
    let Some(window) = web_sys::window() else {
        warn!("No browser window to open {url}");
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        warn!("Failed to open {url}: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_external(url: &str) {
    info!("Apply at {url}");
}

type ToggleQuery<'w, 's> =
    Query<'w, 's, &'static Interaction, (Changed<Interaction>, With<ViewAllToggle>)>;

#[allow(clippy::too_many_arguments)]
fn toggle_view_all(
    mut commands: Commands,
    toggles: ToggleQuery,
    mut page: ResMut<PageView>,
    mut observers: ResMut<ListingObservers>,
    existing: Query<(Entity, &ListingCard)>,
    content: Query<Entity, With<PageContent>>,
    mut titles: Query<(&ListingTitle, &mut Text), Without<ViewAllLabel>>,
    mut labels: Query<&mut Text, With<ViewAllLabel>>,
) {
    if !toggles.iter().any(|i| *i == Interaction::Pressed) {
        return;
    }
    let Ok(content) = content.single() else {
        return;
    };

    let show_all = !page.show_all_internships;
    page.set_show_all(show_all);

    for (entity, card) in &existing {
        if card.listing == Listing::Internships {
            commands.entity(entity).despawn();
        }
    }
    let ids = spawn_cards(&mut commands, content, Listing::Internships, show_all, &observers);
    observers.get_mut(Listing::Internships).observe(ids);

    for (title, mut text) in &mut titles {
        if title.0 == Listing::Internships {
            text.0 = listing_title(Listing::Internships, show_all).to_string();
        }
    }
    for mut text in &mut labels {
        text.0 = toggle_label(show_all).to_string();
    }
}

fn track_visibility(
    time: Res<Time>,
    page: Res<PageView>,
    mut observers: ResMut<ListingObservers>,
    mut cards: Query<(&ListingCard, &mut CardReveal)>,
) {
    let now = time.elapsed_secs();
    let viewport = page.layout.viewport_rect(page.scroll);
    for (card, mut reveal) in &mut cards {
        let Some(rect) = page.layout.cards(card.listing).get(card.index) else {
            continue;
        };
        if observers
            .get_mut(card.listing)
            .sample(card.id, *rect, viewport)
        {
            reveal.start = Some(reveal_start(now, card.index));
        }
    }
}

type CardQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static ListingCard,
        &'static CardReveal,
        &'static mut Node,
        &'static mut BackgroundColor,
        &'static mut BorderColor,
        &'static Children,
    ),
    Without<ControlRow>,
>;

fn position_cards(
    time: Res<Time>,
    page: Res<PageView>,
    mut cards: CardQuery,
    mut texts: Query<(&CardText, &mut TextColor)>,
    mut apply_buttons: Query<&mut Visibility, With<ApplyLink>>,
    mut rows: Query<(&ControlRow, &mut Node), Without<ListingCard>>,
) {
    let now = time.elapsed_secs();
    let card_bg = color_from_hex(Colors::CARD_BG);
    let card_border = color_from_hex(Colors::CARD_BORDER);

    for (card, reveal, mut node, mut bg, mut border, children) in &mut cards {
        let Some(rect) = page.layout.cards(card.listing).get(card.index) else {
            continue;
        };
        let t = ease_out(reveal_progress(*reveal, now));
        node.left = Val::Px(rect.x);
        node.top = Val::Px(rect.y + ENTER_OFFSET * (1.0 - t));
        node.width = Val::Px(rect.width);
        node.height = Val::Px(rect.height);

        let alpha = t;
        if bg.0.alpha() != alpha {
            bg.0 = card_bg.with_alpha(alpha);
            *border = BorderColor::all(card_border.with_alpha(alpha));
            for child in children.iter() {
                if let Ok((text, mut color)) = texts.get_mut(child) {
                    color.0 = text.base.with_alpha(alpha);
                }
                if let Ok(mut visibility) = apply_buttons.get_mut(child) {
                    *visibility = if alpha > 0.0 {
                        Visibility::Inherited
                    } else {
                        Visibility::Hidden
                    };
                }
            }
        }
    }

    for (row, mut node) in &mut rows {
        let rect = match row {
            ControlRow::ViewAll => page.layout.toggle_rect(),
            ControlRow::JoinCta => page.layout.cta_rect(),
        };
        node.left = Val::Px(rect.x);
        node.top = Val::Px(rect.y);
        node.width = Val::Px(rect.width);
        node.height = Val::Px(rect.height);
    }
}

fn detach_removed_listings(
    mut removed: RemovedComponents<ListingSection>,
    mut observers: ResMut<ListingObservers>,
) {
    for entity in removed.read() {
        let Some(pos) = observers.sections.iter().position(|(e, _)| *e == entity) else {
            continue;
        };
        let (_, listing) = observers.sections.swap_remove(pos);
        observers.get_mut(listing).detach();
        debug!("Stopped observing {:?}", listing);
    }
}
