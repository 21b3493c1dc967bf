use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use nexora_shared::catalog::{internships, Listing};

use crate::constants::{color_from_hex, Colors};
use crate::layout::{
    nav_is_solid, PageLayout, Section, MAX_CONTENT_WIDTH, NAV_HEIGHT, SECTION_PADDING, SIDE_PADDING,
};

use super::core::UpdateSet;

pub struct PagePlugin;

/// Scroll easing rate for anchor jumps (per second).
const SCROLL_EASE: f32 = 10.0;
const SCROLL_SNAP: f32 = 0.5;

/// Page geometry plus scroll state.
#[derive(Resource, Debug, Clone)]
pub(crate) struct PageView {
    pub(crate) layout: PageLayout,
    pub(crate) scroll: f32,
    scroll_target: Option<f32>,
    pub(crate) show_all_internships: bool,
    /// Whether the folded nav menu is dropped down.
    pub(crate) menu_open: bool,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            layout: PageLayout::compute(1280.0, 720.0, internships(false).len()),
            scroll: 0.0,
            scroll_target: None,
            show_all_internships: false,
            menu_open: false,
        }
    }
}

impl PageView {
    pub(crate) fn relayout(&mut self, width: f32, height: f32) {
        self.layout = PageLayout::compute(
            width,
            height,
            internships(self.show_all_internships).len(),
        );
        self.scroll = self.layout.clamp_scroll(self.scroll);
        self.scroll_target = self.scroll_target.map(|t| self.layout.clamp_scroll(t));
        if !self.layout.nav_collapsed() {
            self.menu_open = false;
        }
    }

    /// Drop the nav menu down or fold it back. Only a collapsed nav has one.
    pub(crate) fn toggle_menu(&mut self) {
        self.menu_open = self.layout.nav_collapsed() && !self.menu_open;
    }

    pub(crate) fn set_show_all(&mut self, show_all: bool) {
        self.show_all_internships = show_all;
        let (w, h) = (self.layout.viewport_width, self.layout.viewport_height);
        self.relayout(w, h);
    }

    /// Immediate scroll; cancels a running anchor jump.
    pub(crate) fn scroll_by(&mut self, delta: f32) {
        self.scroll_target = None;
        self.scroll = self.layout.clamp_scroll(self.scroll + delta);
    }

    pub(crate) fn jump_to(&mut self, section: Section) {
        self.scroll_target = Some(self.layout.anchor_offset(section));
    }

    pub(crate) fn is_jumping(&self) -> bool {
        self.scroll_target.is_some()
    }

    /// Ease toward the jump target.
    pub(crate) fn advance(&mut self, dt: f32) {
        let Some(target) = self.scroll_target else {
            return;
        };
        let t = (dt * SCROLL_EASE).clamp(0.0, 1.0);
        self.scroll += (target - self.scroll) * t;
        if (target - self.scroll).abs() < SCROLL_SNAP {
            self.scroll = target;
            self.scroll_target = None;
        }
    }

    pub(crate) fn nav_solid(&self) -> bool {
        nav_is_solid(self.scroll)
    }
}

/// Scrolled container holding every section and card.
#[derive(Component)]
pub(crate) struct PageContent;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageSection(pub(crate) Section);

/// Listing sections get their heading and cards from the listings plugin.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListingSection(pub(crate) Listing);

#[derive(Component)]
pub(crate) struct ContactSection;

#[derive(Component)]
struct NavBar;

/// Container of the nav bar's section links.
#[derive(Component)]
struct NavLinks;

/// Button that shows the nav links on narrow pages.
#[derive(Component)]
struct MenuToggle;

/// Scrolls the page to a section when pressed.
#[derive(Component, Debug, Clone, Copy)]
pub(crate) struct NavLink(pub(crate) Section);

/// Background colors for a button's idle and hovered states.
#[derive(Component, Debug, Clone, Copy)]
pub(crate) struct HoverTint {
    pub(crate) idle: Color,
    pub(crate) hovered: Color,
}

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageView>()
            .add_systems(Startup, spawn_page)
            .add_systems(
                Update,
                (
                    (menu_toggle_clicks, nav_link_clicks)
                        .chain()
                        .in_set(UpdateSet::Input),
                    (
                        ease_scroll,
                        apply_page_layout,
                        update_nav_background,
                        apply_nav_menu,
                        apply_hover_tint,
                    )
                        .chain()
                        .in_set(UpdateSet::Page),
                ),
            );
    }
}

pub(crate) fn absolute_rect(rect: nexora_shared::visibility::Rect) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(rect.x),
        top: Val::Px(rect.y),
        width: Val::Px(rect.width),
        height: Val::Px(rect.height),
        ..default()
    }
}

/// Centered column matching the card grid's horizontal extent.
pub(crate) fn content_column() -> Node {
    Node {
        width: Val::Percent(100.0),
        max_width: Val::Px(MAX_CONTENT_WIDTH + 2.0 * SIDE_PADDING),
        margin: UiRect::horizontal(Val::Auto),
        padding: UiRect::new(
            Val::Px(SIDE_PADDING),
            Val::Px(SIDE_PADDING),
            Val::Px(SECTION_PADDING),
            Val::Px(0.0),
        ),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(16.0),
        ..default()
    }
}

pub(crate) fn heading(text: impl Into<String>, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont::from_font_size(size),
        TextColor(color_from_hex(Colors::TEXT)),
    )
}

pub(crate) fn body_text(text: impl Into<String>, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont::from_font_size(size),
        TextColor(color_from_hex(Colors::TEXT_DIM)),
    )
}

pub(crate) fn brand_button(label: &str) -> impl Bundle {
    (
        button_frame(),
        children![(
            Text::new(label),
            TextFont::from_font_size(16.0),
            TextColor(color_from_hex(Colors::TEXT)),
        )],
    )
}

/// Brand-colored button without a label.
pub(crate) fn button_frame() -> impl Bundle {
    let idle = color_from_hex(Colors::BRAND);
    (
        Button,
        Node {
            padding: UiRect::axes(Val::Px(24.0), Val::Px(12.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(idle),
        BorderRadius::all(Val::Px(8.0)),
        HoverTint {
            idle,
            hovered: color_from_hex(Colors::BRAND_DARK),
        },
    )
}

pub(crate) fn spawn_page(
    mut commands: Commands,
    mut page: ResMut<PageView>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    if let Ok(window) = windows.single() {
        page.relayout(window.width(), window.height());
    }
    let layout = page.layout.clone();

    let content = commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(layout.content_height),
                ..default()
            },
            PageContent,
        ))
        .id();

    for section in Section::ORDER {
        let background = match section {
            // The scene shows through the hero.
            Section::Hero => Color::NONE,
            Section::Footer => color_from_hex(Colors::NAV_BG),
            _ => color_from_hex(Colors::PAGE_BG).with_alpha(0.94),
        };
        let mut entity = commands.spawn((
            absolute_rect(layout.section(section)),
            BackgroundColor(background),
            PageSection(section),
            ChildOf(content),
        ));
        if let Some(listing) = section.listing() {
            entity.insert(ListingSection(listing));
        }
        if section == Section::Contact {
            entity.insert(ContactSection);
        }
        let id = entity.id();

        match section {
            Section::Hero => spawn_hero(&mut commands, id),
            Section::About => spawn_about(&mut commands, id),
            Section::Footer => spawn_footer(&mut commands, id),
            _ => {}
        }
    }

    spawn_nav(&mut commands);
}

fn spawn_nav(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(NAV_HEIGHT),
                padding: UiRect::horizontal(Val::Px(SIDE_PADDING)),
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::NONE),
            GlobalZIndex(10),
            NavBar,
        ))
        .with_children(|nav| {
            nav.spawn((
                Button,
                Node::default(),
                NavLink(Section::Hero),
                children![(
                    Text::new("NEXORA"),
                    TextFont::from_font_size(24.0),
                    TextColor(color_from_hex(Colors::BRAND)),
                )],
            ));
            nav.spawn((nav_links_row(), BackgroundColor(Color::NONE), NavLinks))
                .with_children(|links| {
                    for section in Section::NAV_LINKS {
                        links.spawn((
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                                ..default()
                            },
                            BackgroundColor(Color::NONE),
                            BorderRadius::all(Val::Px(6.0)),
                            HoverTint {
                                idle: Color::NONE,
                                hovered: color_from_hex(Colors::CARD_BG),
                            },
                            NavLink(section),
                            children![(
                                Text::new(section.nav_label()),
                                TextFont::from_font_size(15.0),
                                TextColor(color_from_hex(Colors::TEXT)),
                            )],
                        ));
                    }
                });
            nav.spawn((
                Button,
                Node {
                    display: Display::None,
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(Color::NONE),
                BorderColor::all(color_from_hex(Colors::CARD_BORDER)),
                BorderRadius::all(Val::Px(6.0)),
                HoverTint {
                    idle: Color::NONE,
                    hovered: color_from_hex(Colors::CARD_BG),
                },
                MenuToggle,
                children![(
                    Text::new("Menu"),
                    TextFont::from_font_size(15.0),
                    TextColor(color_from_hex(Colors::TEXT)),
                )],
            ));
        });
}

/// Nav links laid out inline in the bar.
fn nav_links_row() -> Node {
    Node {
        column_gap: Val::Px(28.0),
        align_items: AlignItems::Center,
        ..default()
    }
}

/// Nav links dropped down under the bar as a column.
fn nav_links_menu(open: bool) -> Node {
    Node {
        display: if open { Display::Flex } else { Display::None },
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        top: Val::Px(NAV_HEIGHT),
        width: Val::Percent(100.0),
        padding: UiRect::axes(Val::Px(SIDE_PADDING), Val::Px(12.0)),
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(4.0),
        ..default()
    }
}

fn spawn_hero(commands: &mut Commands, section: Entity) {
    commands.entity(section).with_children(|hero| {
        hero.spawn(Node {
            width: Val::Percent(100.0),
            max_width: Val::Px(MAX_CONTENT_WIDTH + 2.0 * SIDE_PADDING),
            height: Val::Percent(100.0),
            margin: UiRect::horizontal(Val::Auto),
            padding: UiRect::new(
                Val::Px(SIDE_PADDING),
                Val::Px(SIDE_PADDING),
                Val::Px(NAV_HEIGHT),
                Val::Px(0.0),
            ),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            row_gap: Val::Px(24.0),
            ..default()
        })
        .with_children(|col| {
            col.spawn((
                Node {
                    align_self: AlignSelf::FlexStart,
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                    ..default()
                },
                BackgroundColor(color_from_hex(Colors::BRAND).with_alpha(0.15)),
                BorderRadius::MAX,
                children![(
                    Text::new("Empowering Future Leaders"),
                    TextFont::from_font_size(14.0),
                    TextColor(color_from_hex(Colors::BRAND)),
                )],
            ));
            col.spawn((
                Node {
                    max_width: Val::Px(620.0),
                    ..default()
                },
                children![heading("Build Your Career with NEXORA", 52.0)],
            ));
            col.spawn((
                Node {
                    max_width: Val::Px(560.0),
                    ..default()
                },
                children![body_text(
                    "Connect with internships, courses, and journals that shape your \
                     future in technology and innovation.",
                    20.0,
                )],
            ));
            col.spawn(Node {
                column_gap: Val::Px(16.0),
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    brand_button("Explore Opportunities"),
                    NavLink(Section::Internships),
                ));
                row.spawn((brand_button("Learn More"), NavLink(Section::About)));
            });
            col.spawn(Node {
                column_gap: Val::Px(40.0),
                padding: UiRect::top(Val::Px(24.0)),
                ..default()
            })
            .with_children(|stats| {
                let figures = [
                    ("500+", "Internships"),
                    ("200+", "Courses"),
                    ("10K+", "Students"),
                ];
                for (value, label) in figures {
                    stats.spawn((
                        Node {
                            flex_direction: FlexDirection::Column,
                            ..default()
                        },
                        children![heading(value, 28.0), body_text(label, 14.0)],
                    ));
                }
            });
        });
    });
}

fn spawn_about(commands: &mut Commands, section: Entity) {
    commands.entity(section).with_children(|about| {
        about
            .spawn(content_column())
            .with_children(|col| {
                col.spawn(heading("Bridging the Gap Between Education and Industry", 36.0));
                col.spawn(body_text(
                    "At NEXORA, we believe in the transformative power of practical \
                     experience and industry-relevant education. Our mission is to \
                     empower students with the skills, opportunities, and resources \
                     needed to thrive in today's competitive job market.",
                    17.0,
                ));
                col.spawn(body_text(
                    "Founded in 2024, we've built a vibrant community of learners, \
                     educators, and industry partners all working together to create \
                     meaningful pathways for student success.",
                    17.0,
                ));
                col.spawn(Node {
                    column_gap: Val::Px(20.0),
                    row_gap: Val::Px(20.0),
                    flex_wrap: FlexWrap::Wrap,
                    padding: UiRect::top(Val::Px(16.0)),
                    ..default()
                })
                .with_children(|stats| {
                    for (value, label) in [
                        ("10,000+", "Students Helped"),
                        ("500+", "Internship Placements"),
                        ("200+", "Courses Available"),
                        ("50+", "Partner Companies"),
                    ] {
                        stats.spawn((
                            Node {
                                width: Val::Px(200.0),
                                padding: UiRect::all(Val::Px(20.0)),
                                flex_direction: FlexDirection::Column,
                                align_items: AlignItems::Center,
                                border: UiRect::all(Val::Px(1.0)),
                                ..default()
                            },
                            BackgroundColor(color_from_hex(Colors::CARD_BG)),
                            BorderColor::all(color_from_hex(Colors::CARD_BORDER)),
                            BorderRadius::all(Val::Px(10.0)),
                            children![heading(value, 26.0), body_text(label, 13.0)],
                        ));
                    }
                });
            });
    });
}

fn spawn_footer(commands: &mut Commands, section: Entity) {
    commands.entity(section).with_children(|footer| {
        footer
            .spawn(Node {
                width: Val::Percent(100.0),
                max_width: Val::Px(MAX_CONTENT_WIDTH + 2.0 * SIDE_PADDING),
                margin: UiRect::horizontal(Val::Auto),
                padding: UiRect::all(Val::Px(SIDE_PADDING)),
                column_gap: Val::Px(48.0),
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            })
            .with_children(|row| {
                row.spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        max_width: Val::Px(320.0),
                        row_gap: Val::Px(12.0),
                        ..default()
                    },
                    children![
                        (
                            Text::new("NEXORA"),
                            TextFont::from_font_size(22.0),
                            TextColor(color_from_hex(Colors::BRAND)),
                        ),
                        body_text(
                            "Bridging the gap between students and opportunities through \
                             quality internships, courses, and publications.",
                            14.0,
                        ),
                        body_text("© Nexora. All rights reserved.", 12.0),
                    ],
                ));
                row.spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|links| {
                    links.spawn(heading("Quick Links", 17.0));
                    for section in Section::NAV_LINKS {
                        links.spawn((
                            Button,
                            Node::default(),
                            NavLink(section),
                            children![body_text(section.nav_label(), 14.0)],
                        ));
                    }
                });
                row.spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(8.0),
                        ..default()
                    },
                    children![
                        heading("Contact Us", 17.0),
                        body_text("noreply.nexora@gmail.com", 14.0),
                    ],
                ));
            });
    });
}

fn menu_toggle_clicks(
    toggles: Query<&Interaction, (Changed<Interaction>, With<MenuToggle>)>,
    mut page: ResMut<PageView>,
) {
    if toggles.iter().any(|i| *i == Interaction::Pressed) {
        page.toggle_menu();
    }
}

fn nav_link_clicks(
    links: Query<(&Interaction, &NavLink), (Changed<Interaction>, With<Button>)>,
    mut page: ResMut<PageView>,
) {
    for (interaction, link) in &links {
        if *interaction == Interaction::Pressed {
            debug!("Jumping to #{}", link.0.anchor());
            page.jump_to(link.0);
            page.menu_open = false;
        }
    }
}

fn ease_scroll(time: Res<Time>, mut page: ResMut<PageView>) {
    if page.is_jumping() {
        page.advance(time.delta_secs());
    }
}

fn apply_page_layout(
    page: Res<PageView>,
    mut content: Query<&mut Node, (With<PageContent>, Without<PageSection>)>,
    mut sections: Query<(&PageSection, &mut Node), Without<PageContent>>,
) {
    if !page.is_changed() {
        return;
    }
    for mut node in &mut content {
        node.top = Val::Px(-page.scroll);
        node.height = Val::Px(page.layout.content_height);
    }
    for (section, mut node) in &mut sections {
        let rect = page.layout.section(section.0);
        node.left = Val::Px(rect.x);
        node.top = Val::Px(rect.y);
        node.width = Val::Px(rect.width);
        node.height = Val::Px(rect.height);
    }
}

fn update_nav_background(page: Res<PageView>, mut nav: Query<&mut BackgroundColor, With<NavBar>>) {
    if !page.is_changed() {
        return;
    }
    let color = if page.nav_solid() {
        color_from_hex(Colors::NAV_BG).with_alpha(0.92)
    } else {
        Color::NONE
    };
    for mut bg in &mut nav {
        if bg.0 != color {
            bg.0 = color;
        }
    }
}

type NavLinksQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Node, &'static mut BackgroundColor),
    (With<NavLinks>, Without<MenuToggle>),
>;

fn apply_nav_menu(
    page: Res<PageView>,
    mut links: NavLinksQuery,
    mut toggles: Query<&mut Node, (With<MenuToggle>, Without<NavLinks>)>,
) {
    if !page.is_changed() {
        return;
    }
    let collapsed = page.layout.nav_collapsed();
    for mut node in &mut toggles {
        node.display = if collapsed {
            Display::Flex
        } else {
            Display::None
        };
    }
    for (mut node, mut bg) in &mut links {
        if collapsed {
            *node = nav_links_menu(page.menu_open);
            bg.0 = color_from_hex(Colors::NAV_BG).with_alpha(0.97);
        } else {
            *node = nav_links_row();
            bg.0 = Color::NONE;
        }
    }
}

fn apply_hover_tint(
    mut buttons: Query<(&Interaction, &HoverTint, &mut BackgroundColor), Changed<Interaction>>,
) {
    for (interaction, tint, mut bg) in &mut buttons {
        bg.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => tint.hovered,
            Interaction::None => tint.idle,
        };
    }
}
