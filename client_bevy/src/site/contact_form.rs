use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use nexora_shared::contact::{ContactField, ContactForm, DeliveryOutcome, SubmitResult};
use nexora_shared::protocol::Domain;

use crate::constants::{color_from_hex, Colors};
use crate::shared::delivery::ContactDelivery;

use super::page::{body_text, brand_button, content_column, heading, spawn_page, ContactSection};
use super::UpdateSet;

pub struct ContactFormPlugin;

/// Seconds a toast stays on screen.
pub const TOAST_SECS: f64 = 4.0;
const MAX_FIELD_CHARS: usize = 1000;

/// Field receiving keyboard input, if any. Page scrolling keys are ignored
/// while this is set.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FocusedField(pub(crate) Option<ContactField>);

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub(crate) struct ContactFormState(pub(crate) ContactForm);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ToastTone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Toast {
    pub(crate) tone: ToastTone,
    pub(crate) title: &'static str,
    pub(crate) body: &'static str,
    until: f64,
}

impl Toast {
    fn success(now: f64) -> Self {
        Self {
            tone: ToastTone::Success,
            title: "Form submitted successfully!",
            body: "We've received your information and will contact you soon.",
            until: now + TOAST_SECS,
        }
    }

    fn error(now: f64) -> Self {
        Self {
            tone: ToastTone::Error,
            title: "Error submitting form",
            body: "Please try again later.",
            until: now + TOAST_SECS,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub(crate) struct ActiveToast(pub(crate) Option<Toast>);

/// A keystroke as seen by the form editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditKey {
    Text(String),
    Backspace,
    Tab,
    Enter,
    Escape,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EditAction {
    None,
    Submit,
}

/// Apply one keystroke to the focused field.
pub(crate) fn edit_form(
    form: &mut ContactForm,
    focus: &mut Option<ContactField>,
    key: EditKey,
) -> EditAction {
    let Some(field) = *focus else {
        return EditAction::None;
    };

    match key {
        EditKey::Tab => *focus = Some(field.next()),
        EditKey::Escape => *focus = None,
        EditKey::Enter => match field {
            ContactField::Domain => form.set_domain(Domain::next(form.draft.domain)),
            ContactField::Message => push_text(form, field, "\n"),
            _ => return EditAction::Submit,
        },
        EditKey::Backspace => {
            if let Some(text) = form.draft.text_mut(field) {
                text.pop();
                form.revalidate(field);
            }
        }
        EditKey::Text(s) => {
            if field == ContactField::Domain {
                if s == " " {
                    form.set_domain(Domain::next(form.draft.domain));
                }
            } else {
                push_text(form, field, &s);
            }
        }
    }
    EditAction::None
}

fn push_text(form: &mut ContactForm, field: ContactField, s: &str) {
    let Some(text) = form.draft.text_mut(field) else {
        return;
    };
    let multiline = field == ContactField::Message;
    for c in s.chars() {
        if text.chars().count() >= MAX_FIELD_CHARS {
            break;
        }
        if c.is_control() && !(multiline && c == '\n') {
            continue;
        }
        text.push(c);
    }
    form.revalidate(field);
}

fn placeholder(field: ContactField) -> &'static str {
    match field {
        ContactField::FullName => "Enter your full name",
        ContactField::Email => "Enter your email",
        ContactField::Phone => "Enter your phone number",
        ContactField::Domain => "Select your needs",
        ContactField::Message => "Any specific requirements or questions?",
    }
}

#[derive(Component)]
struct FormPanel;

#[derive(Component)]
struct SuccessPanel;

#[derive(Component, Clone, Copy)]
struct FieldBox(ContactField);

#[derive(Component, Clone, Copy)]
struct FieldValue(ContactField);

#[derive(Component, Clone, Copy)]
struct FieldError(ContactField);

#[derive(Component)]
struct SubmitButton;

#[derive(Component)]
struct DismissButton;

#[derive(Component)]
struct ToastBox;

#[derive(Component)]
struct ToastTitle;

#[derive(Component)]
struct ToastBody;

impl Plugin for ContactFormPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactFormState>()
            .init_resource::<FocusedField>()
            .init_resource::<ActiveToast>()
            .add_systems(Startup, spawn_contact_form.after(spawn_page))
            .add_systems(
                Update,
                (
                    (field_clicks, type_into_form, button_clicks)
                        .chain()
                        .in_set(UpdateSet::Input),
                    (tick_form, poll_delivery, render_form, render_toast)
                        .chain()
                        .in_set(UpdateSet::Page),
                ),
            );
    }
}

fn spawn_contact_form(mut commands: Commands, sections: Query<Entity, With<ContactSection>>) {
    for section in &sections {
        commands.entity(section).with_children(|parent| {
            parent.spawn(content_column()).with_children(|col| {
                col.spawn(heading("Get in Touch", 36.0));
                col.spawn(body_text(
                    "Interested in our internships, courses, or journals? Fill out the \
                     form below and we'll connect with you.",
                    17.0,
                ));
                col.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        max_width: Val::Px(720.0),
                        margin: UiRect::horizontal(Val::Auto),
                        padding: UiRect::all(Val::Px(28.0)),
                        flex_direction: FlexDirection::Column,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BackgroundColor(color_from_hex(Colors::CARD_BG)),
                    BorderColor::all(color_from_hex(Colors::CARD_BORDER)),
                    BorderRadius::all(Val::Px(14.0)),
                ))
                .with_children(|card| {
                    spawn_fields(card);
                    spawn_success_panel(card);
                });
            });
        });
    }

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(24.0),
                bottom: Val::Px(24.0),
                max_width: Val::Px(360.0),
                padding: UiRect::all(Val::Px(16.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                display: Display::None,
                ..default()
            },
            BackgroundColor(color_from_hex(Colors::NAV_BG)),
            BorderRadius::all(Val::Px(10.0)),
            GlobalZIndex(20),
            ToastBox,
        ))
        .with_children(|toast| {
            toast.spawn((
                Text::default(),
                TextFont::from_font_size(16.0),
                TextColor(color_from_hex(Colors::TEXT)),
                ToastTitle,
            ));
            toast.spawn((
                Text::default(),
                TextFont::from_font_size(14.0),
                TextColor(color_from_hex(Colors::TEXT_DIM)),
                ToastBody,
            ));
        });
}

fn spawn_fields(card: &mut ChildSpawnerCommands) {
    card.spawn((
        Node {
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(6.0),
            ..default()
        },
        FormPanel,
    ))
    .with_children(|form| {
        for field in ContactField::ALL {
            form.spawn((
                Text::new(field.label()),
                TextFont::from_font_size(14.0),
                TextColor(color_from_hex(Colors::TEXT)),
            ));
            let height = if field == ContactField::Message { 96.0 } else { 44.0 };
            form.spawn((
                Button,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Px(height),
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(10.0)),
                    border: UiRect::all(Val::Px(1.0)),
                    overflow: Overflow::clip(),
                    ..default()
                },
                BackgroundColor(color_from_hex(Colors::FIELD_BG)),
                BorderColor::all(color_from_hex(Colors::CARD_BORDER)),
                BorderRadius::all(Val::Px(8.0)),
                FieldBox(field),
                children![(
                    Text::new(placeholder(field)),
                    TextFont::from_font_size(15.0),
                    TextColor(color_from_hex(Colors::TEXT_DIM)),
                    FieldValue(field),
                )],
            ));
            form.spawn((
                Node {
                    min_height: Val::Px(18.0),
                    ..default()
                },
                children![(
                    Text::default(),
                    TextFont::from_font_size(12.0),
                    TextColor(color_from_hex(Colors::DESTRUCTIVE)),
                    FieldError(field),
                )],
            ));
        }
        form.spawn((
            Node {
                padding: UiRect::top(Val::Px(8.0)),
                ..default()
            },
            children![(brand_button("Submit"), SubmitButton)],
        ));
    });
}

fn spawn_success_panel(card: &mut ChildSpawnerCommands) {
    card.spawn((
        Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(16.0),
            padding: UiRect::vertical(Val::Px(40.0)),
            display: Display::None,
            ..default()
        },
        SuccessPanel,
    ))
    .with_children(|panel| {
        panel.spawn((
            Text::new("Thank You!"),
            TextFont::from_font_size(28.0),
            TextColor(color_from_hex(Colors::SUCCESS)),
        ));
        panel.spawn(body_text(
            "Your information has been received. We'll get back to you shortly.",
            16.0,
        ));
        panel.spawn((brand_button("Submit Another Request"), DismissButton));
    });
}

fn field_clicks(
    fields: Query<(&Interaction, &FieldBox), Changed<Interaction>>,
    mut focus: ResMut<FocusedField>,
    mut form: ResMut<ContactFormState>,
) {
    for (interaction, field) in &fields {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if field.0 == ContactField::Domain {
            let next = Domain::next(form.draft.domain);
            form.set_domain(next);
        }
        focus.0 = Some(field.0);
    }
}

fn key_from_input(ev: &KeyboardInput) -> Option<EditKey> {
    if ev.state != ButtonState::Pressed {
        return None;
    }
    match &ev.logical_key {
        Key::Backspace => Some(EditKey::Backspace),
        Key::Tab => Some(EditKey::Tab),
        Key::Enter => Some(EditKey::Enter),
        Key::Escape => Some(EditKey::Escape),
        _ => ev.text.as_ref().map(|t| EditKey::Text(t.to_string())),
    }
}

fn type_into_form(
    mut keys: MessageReader<KeyboardInput>,
    mut focus: ResMut<FocusedField>,
    mut form: ResMut<ContactFormState>,
    mut delivery: ResMut<ContactDelivery>,
    mut toast: ResMut<ActiveToast>,
    time: Res<Time>,
) {
    if focus.0.is_none() {
        keys.clear();
        return;
    }
    for key in keys.read().filter_map(key_from_input) {
        let mut current = focus.0;
        let action = edit_form(&mut form, &mut current, key);
        if current != focus.0 {
            focus.0 = current;
        }
        if action == EditAction::Submit {
            submit(&mut form, &mut focus, &mut delivery, &mut toast, time.elapsed_secs_f64());
        }
    }
}

type ButtonClicks<'w, 's, T> =
    Query<'w, 's, &'static Interaction, (Changed<Interaction>, With<T>)>;

fn button_clicks(
    submit_buttons: ButtonClicks<SubmitButton>,
    dismiss_buttons: ButtonClicks<DismissButton>,
    mut focus: ResMut<FocusedField>,
    mut form: ResMut<ContactFormState>,
    mut delivery: ResMut<ContactDelivery>,
    mut toast: ResMut<ActiveToast>,
    time: Res<Time>,
) {
    if submit_buttons.iter().any(|i| *i == Interaction::Pressed) {
        submit(&mut form, &mut focus, &mut delivery, &mut toast, time.elapsed_secs_f64());
    }
    if dismiss_buttons.iter().any(|i| *i == Interaction::Pressed) {
        form.dismiss_success();
    }
}

fn submit(
    form: &mut ContactForm,
    focus: &mut FocusedField,
    delivery: &mut ContactDelivery,
    toast: &mut ActiveToast,
    now: f64,
) {
    match form.submit(now, delivery) {
        SubmitResult::Sent => {
            info!("Contact form dispatched (#{})", delivery.dispatched());
            focus.0 = None;
            toast.0 = Some(Toast::success(now));
        }
        SubmitResult::Invalid => {
            debug!("Contact form has {} invalid fields", form.errors.len());
        }
        SubmitResult::DispatchFailed(e) => {
            warn!("Contact form could not be sent: {e}");
            toast.0 = Some(Toast::error(now));
        }
    }
}

fn tick_form(time: Res<Time>, mut form: ResMut<ContactFormState>, mut toast: ResMut<ActiveToast>) {
    let now = time.elapsed_secs_f64();
    if form.is_success() {
        form.tick(now);
    }
    if toast.0.as_ref().is_some_and(|t| now >= t.until) {
        toast.0 = None;
    }
}

/// The UI already showed success; outcomes are only recorded and logged.
fn poll_delivery(delivery: Res<ContactDelivery>, mut form: ResMut<ContactFormState>) {
    for outcome in delivery.poll_outcomes() {
        match &outcome {
            DeliveryOutcome::Delivered { status } if outcome.is_failure() => {
                warn!("Contact endpoint answered {status}");
            }
            DeliveryOutcome::Delivered { status } => {
                info!("Contact submission delivered ({status})");
            }
            DeliveryOutcome::Opaque => info!("Contact submission sent"),
            DeliveryOutcome::Failed { reason } => {
                warn!("Contact submission failed: {reason}");
            }
        }
        form.record_delivery(outcome);
    }
}

#[allow(clippy::type_complexity)]
fn render_form(
    form: Res<ContactFormState>,
    focus: Res<FocusedField>,
    mut panels: ParamSet<(
        Query<&mut Node, With<FormPanel>>,
        Query<&mut Node, With<SuccessPanel>>,
    )>,
    mut boxes: Query<(&FieldBox, &mut BorderColor)>,
    mut values: Query<(&FieldValue, &mut Text, &mut TextColor), Without<FieldError>>,
    mut errors: Query<(&FieldError, &mut Text), Without<FieldValue>>,
) {
    if !form.is_changed() && !focus.is_changed() {
        return;
    }

    let success = form.is_success();
    for mut node in &mut panels.p0() {
        node.display = if success { Display::None } else { Display::Flex };
    }
    for mut node in &mut panels.p1() {
        node.display = if success { Display::Flex } else { Display::None };
    }

    for (field, mut border) in &mut boxes {
        let color = if focus.0 == Some(field.0) {
            Colors::FIELD_FOCUS
        } else if form.errors.get(field.0).is_some() {
            Colors::DESTRUCTIVE
        } else {
            Colors::CARD_BORDER
        };
        *border = BorderColor::all(color_from_hex(color));
    }

    for (field, mut text, mut color) in &mut values {
        let value = form.draft.text(field.0);
        let focused = focus.0 == Some(field.0);
        let (shown, tone) = if value.is_empty() && !focused {
            (placeholder(field.0).to_string(), Colors::TEXT_DIM)
        } else if focused && field.0 != ContactField::Domain {
            (format!("{value}|"), Colors::TEXT)
        } else {
            (value.to_string(), Colors::TEXT)
        };
        text.0 = shown;
        color.0 = color_from_hex(tone);
    }

    for (field, mut text) in &mut errors {
        text.0 = form.errors.get(field.0).unwrap_or("").to_string();
    }
}

fn render_toast(
    toast: Res<ActiveToast>,
    mut boxes: Query<(&mut Node, &mut BackgroundColor), With<ToastBox>>,
    mut titles: Query<&mut Text, (With<ToastTitle>, Without<ToastBody>)>,
    mut bodies: Query<&mut Text, (With<ToastBody>, Without<ToastTitle>)>,
) {
    if !toast.is_changed() {
        return;
    }
    for (mut node, mut bg) in &mut boxes {
        match &toast.0 {
            Some(t) => {
                node.display = Display::Flex;
                bg.0 = match t.tone {
                    ToastTone::Success => color_from_hex(Colors::NAV_BG),
                    ToastTone::Error => color_from_hex(Colors::DESTRUCTIVE),
                };
            }
            None => node.display = Display::None,
        }
    }
    let (title, body) = toast.0.as_ref().map(|t| (t.title, t.body)).unwrap_or_default();
    for mut text in &mut titles {
        text.0 = title.to_string();
    }
    for mut text in &mut bodies {
        text.0 = body.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(form: &mut ContactForm, focus: &mut Option<ContactField>, s: &str) {
        edit_form(form, focus, EditKey::Text(s.to_string()));
    }

    mod editing {
        use super::*;

        #[test]
        fn unfocused_form_ignores_keys() {
            let mut form = ContactForm::default();
            let mut focus = None;
            typed(&mut form, &mut focus, "abc");
            assert_eq!(form.draft.full_name, "");
        }

        #[test]
        fn typing_and_backspace() {
            let mut form = ContactForm::default();
            let mut focus = Some(ContactField::FullName);
            typed(&mut form, &mut focus, "Jan");
            typed(&mut form, &mut focus, "e");
            edit_form(&mut form, &mut focus, EditKey::Backspace);
            assert_eq!(form.draft.full_name, "Jan");
        }

        #[test]
        fn control_characters_are_dropped() {
            let mut form = ContactForm::default();
            let mut focus = Some(ContactField::Email);
            typed(&mut form, &mut focus, "a\tb\u{7f}");
            assert_eq!(form.draft.email, "ab");
        }

        #[test]
        fn tab_moves_through_fields_and_wraps() {
            let mut form = ContactForm::default();
            let mut focus = Some(ContactField::Phone);
            edit_form(&mut form, &mut focus, EditKey::Tab);
            assert_eq!(focus, Some(ContactField::Domain));
            edit_form(&mut form, &mut focus, EditKey::Tab);
            edit_form(&mut form, &mut focus, EditKey::Tab);
            assert_eq!(focus, Some(ContactField::FullName));
        }

        #[test]
        fn escape_drops_focus() {
            let mut form = ContactForm::default();
            let mut focus = Some(ContactField::Message);
            edit_form(&mut form, &mut focus, EditKey::Escape);
            assert_eq!(focus, None);
        }

        #[test]
        fn domain_cycles_on_space_and_enter() {
            let mut form = ContactForm::default();
            let mut focus = Some(ContactField::Domain);
            typed(&mut form, &mut focus, " ");
            assert_eq!(form.draft.domain, Some(Domain::Internship));
            let action = edit_form(&mut form, &mut focus, EditKey::Enter);
            assert_eq!(action, EditAction::None);
            assert_eq!(form.draft.domain, Some(Domain::Course));
            typed(&mut form, &mut focus, "x");
            assert_eq!(form.draft.domain, Some(Domain::Course));
        }

        #[test]
        fn enter_submits_except_in_message() {
            let mut form = ContactForm::default();
            let mut focus = Some(ContactField::Email);
            assert_eq!(
                edit_form(&mut form, &mut focus, EditKey::Enter),
                EditAction::Submit
            );

            focus = Some(ContactField::Message);
            typed(&mut form, &mut focus, "hi");
            assert_eq!(
                edit_form(&mut form, &mut focus, EditKey::Enter),
                EditAction::None
            );
            assert_eq!(form.draft.message, "hi\n");
        }

        #[test]
        fn long_input_is_capped() {
            let mut form = ContactForm::default();
            let mut focus = Some(ContactField::Message);
            typed(&mut form, &mut focus, &"a".repeat(MAX_FIELD_CHARS + 50));
            assert_eq!(form.draft.message.chars().count(), MAX_FIELD_CHARS);
        }
    }

    mod app {
        use std::time::Duration;

        use super::*;
        use crate::site::page::PagePlugin;

        fn form_app(endpoint: Option<String>) -> App {
            let mut app = App::new();
            app.add_plugins(MinimalPlugins)
                .add_message::<KeyboardInput>()
                .configure_sets(Update, (UpdateSet::Input, UpdateSet::Page).chain())
                .insert_resource(ContactDelivery::new(endpoint))
                .add_plugins((PagePlugin, ContactFormPlugin));
            app.update();
            app
        }

        fn fill_valid(app: &mut App) {
            let mut form = app.world_mut().resource_mut::<ContactFormState>();
            form.draft.full_name = "Jane Doe".to_string();
            form.draft.email = "jane@x.com".to_string();
            form.draft.phone = "1234567890".to_string();
            form.draft.domain = Some(Domain::Internship);
        }

        fn press<T: Component>(app: &mut App) {
            let world = app.world_mut();
            let mut q = world.query_filtered::<Entity, With<T>>();
            let entity = q.single(world).unwrap();
            world.entity_mut(entity).insert(Interaction::Pressed);
            app.update();
            app.world_mut().entity_mut(entity).insert(Interaction::None);
        }

        fn display_of<T: Component>(app: &mut App) -> Display {
            let world = app.world_mut();
            let mut q = world.query_filtered::<&Node, With<T>>();
            q.single(world).unwrap().display
        }

        #[test]
        fn every_field_is_rendered() {
            let mut app = form_app(None);
            let world = app.world_mut();
            let mut q = world.query::<&FieldBox>();
            assert_eq!(q.iter(world).count(), ContactField::ALL.len());
        }

        #[test]
        fn invalid_submit_shows_errors_and_no_toast() {
            let mut app = form_app(Some("http://127.0.0.1:9/api/contact".to_string()));
            press::<SubmitButton>(&mut app);

            let form = app.world().resource::<ContactFormState>();
            assert_eq!(form.errors.len(), 4);
            assert!(app.world().resource::<ActiveToast>().0.is_none());
            assert_eq!(app.world().resource::<ContactDelivery>().dispatched(), 0);

            let world = app.world_mut();
            let mut q = world.query::<(&FieldError, &Text)>();
            let shown = q.iter(world).filter(|(_, t)| !t.0.is_empty()).count();
            assert_eq!(shown, 4);
        }

        #[test]
        fn missing_endpoint_shows_error_toast_and_keeps_input() {
            let mut app = form_app(None);
            fill_valid(&mut app);
            press::<SubmitButton>(&mut app);

            let toast = app.world().resource::<ActiveToast>();
            assert_eq!(toast.0.as_ref().map(|t| t.tone), Some(ToastTone::Error));
            let form = app.world().resource::<ContactFormState>();
            assert!(!form.is_success());
            assert_eq!(form.draft.full_name, "Jane Doe");
        }

        #[test]
        fn dispatch_shows_success_before_delivery_resolves() {
            let mut app = form_app(Some("http://127.0.0.1:9/api/contact".to_string()));
            fill_valid(&mut app);
            press::<SubmitButton>(&mut app);

            assert!(app.world().resource::<ContactFormState>().is_success());
            assert_eq!(display_of::<SuccessPanel>(&mut app), Display::Flex);
            assert_eq!(display_of::<FormPanel>(&mut app), Display::None);
            let toast = app.world().resource::<ActiveToast>();
            assert_eq!(toast.0.as_ref().map(|t| t.tone), Some(ToastTone::Success));

            // Nothing listens on the discard port, so the delivery fails
            // without changing the panel.
            for _ in 0..100 {
                app.update();
                if app.world().resource::<ContactFormState>().pending_deliveries() == 0 {
                    break;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            let form = app.world().resource::<ContactFormState>();
            assert_eq!(form.pending_deliveries(), 0);
            assert!(form.last_delivery.as_ref().is_some_and(|d| d.is_failure()));
            assert!(form.is_success());
        }

        #[test]
        fn dismiss_returns_to_the_form() {
            let mut app = form_app(Some("http://127.0.0.1:9/api/contact".to_string()));
            fill_valid(&mut app);
            press::<SubmitButton>(&mut app);
            press::<DismissButton>(&mut app);

            assert!(!app.world().resource::<ContactFormState>().is_success());
            assert_eq!(display_of::<FormPanel>(&mut app), Display::Flex);
        }

        #[test]
        fn clicking_domain_focuses_and_cycles() {
            let mut app = form_app(None);
            let domain = {
                let world = app.world_mut();
                let mut q = world.query::<(Entity, &FieldBox)>();
                q.iter(world)
                    .find(|(_, f)| f.0 == ContactField::Domain)
                    .map(|(e, _)| e)
                    .unwrap()
            };
            app.world_mut().entity_mut(domain).insert(Interaction::Pressed);
            app.update();

            assert_eq!(
                app.world().resource::<FocusedField>().0,
                Some(ContactField::Domain)
            );
            assert_eq!(
                app.world().resource::<ContactFormState>().draft.domain,
                Some(Domain::Internship)
            );
        }
    }
}
