//! Contact form model: field validation, the optimistic submit flow and the
//! delivery outcome reported back by the transport.

use std::collections::BTreeMap;

use crate::protocol::{ContactSubmission, Domain};

/// How long the "Thank You!" panel stays up after a submit (seconds).
pub const SUCCESS_DISPLAY_SECS: f64 = 5.0;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PHONE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    FullName,
    Email,
    Phone,
    Domain,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 5] = [
        ContactField::FullName,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Domain,
        ContactField::Message,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactField::FullName => "Full Name",
            ContactField::Email => "Email Address",
            ContactField::Phone => "Phone Number",
            ContactField::Domain => "How can I help you?",
            ContactField::Message => "Additional Message (Optional)",
        }
    }

    /// Next field in tab order, wrapping.
    pub fn next(self) -> ContactField {
        let idx = ContactField::ALL.iter().position(|f| *f == self).unwrap_or(0);
        ContactField::ALL[(idx + 1) % ContactField::ALL.len()]
    }
}

/// Per-field validation messages. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ContactField, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: ContactField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn set(&mut self, field: ContactField, message: &'static str) {
        self.0.insert(field, message);
    }

    fn clear_field(&mut self, field: ContactField) {
        self.0.remove(&field);
    }
}

/// Raw, possibly invalid form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub domain: Option<Domain>,
    pub message: String,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<ContactSubmission, FieldErrors> {
        let mut errors = FieldErrors::default();
        for field in ContactField::ALL {
            if let Some(msg) = self.check(field) {
                errors.set(field, msg);
            }
        }

        let Some(domain) = self.domain else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let message = if self.message.is_empty() {
            None
        } else {
            Some(self.message.clone())
        };
        Ok(ContactSubmission {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            domain,
            message,
        })
    }

    fn check(&self, field: ContactField) -> Option<&'static str> {
        match field {
            ContactField::FullName if self.full_name.chars().count() < MIN_NAME_CHARS => {
                Some("Full name must be at least 2 characters.")
            }
            ContactField::Email if !is_valid_email(&self.email) => {
                Some("Please enter a valid email address.")
            }
            ContactField::Phone if self.phone.chars().count() < MIN_PHONE_CHARS => {
                Some("Please enter a valid phone number.")
            }
            ContactField::Domain if self.domain.is_none() => {
                Some("Please select your interested domain.")
            }
            _ => None,
        }
    }

    /// Text value of a free-text field. `Domain` returns its label.
    pub fn text(&self, field: ContactField) -> &str {
        match field {
            ContactField::FullName => &self.full_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Domain => self.domain.map(Domain::label).unwrap_or(""),
            ContactField::Message => &self.message,
        }
    }

    /// Mutable text of a free-text field; `None` for the domain select.
    pub fn text_mut(&mut self, field: ContactField) -> Option<&mut String> {
        match field {
            ContactField::FullName => Some(&mut self.full_name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Phone => Some(&mut self.phone),
            ContactField::Domain => None,
            ContactField::Message => Some(&mut self.message),
        }
    }
}

/// Loose address check: one `@`, non-empty local part, dotted domain with
/// a TLD of at least two letters, no whitespace or empty labels.
pub fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    if labels
        .iter()
        .any(|l| l.starts_with('-') || l.ends_with('-'))
    {
        return false;
    }
    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Synchronous failure to hand a submission to the network.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("contact endpoint is not configured")]
    NoEndpoint,
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to start request: {0}")]
    Spawn(String),
}

/// What actually happened to a dispatched submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The endpoint answered with this HTTP status.
    Delivered { status: u16 },
    /// The request completed but the response could not be inspected
    /// (no-cors fetch).
    Opaque,
    Failed { reason: String },
}

impl DeliveryOutcome {
    /// True when the submission is known not to have arrived.
    pub fn is_failure(&self) -> bool {
        match self {
            DeliveryOutcome::Delivered { status } => !(200..300).contains(status),
            DeliveryOutcome::Opaque => false,
            DeliveryOutcome::Failed { .. } => true,
        }
    }
}

/// Hands a submission to the network without waiting for the response.
pub trait ContactTransport {
    fn dispatch(&mut self, submission: &ContactSubmission) -> Result<(), DispatchError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormPhase {
    Editing,
    Succeeded { until: f64 },
}

#[derive(Debug)]
pub enum SubmitResult {
    /// Validation failed; nothing was sent.
    Invalid,
    Sent,
    DispatchFailed(DispatchError),
}

/// Contact form state. The UI shows success as soon as dispatch returns;
/// the real outcome arrives later through [`ContactForm::record_delivery`].
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub draft: ContactDraft,
    pub errors: FieldErrors,
    pub phase: FormPhase,
    pub last_delivery: Option<DeliveryOutcome>,
    pending_deliveries: u32,
    submitted_once: bool,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            draft: ContactDraft::default(),
            errors: FieldErrors::default(),
            phase: FormPhase::Editing,
            last_delivery: None,
            pending_deliveries: 0,
            submitted_once: false,
        }
    }
}

impl ContactForm {
    pub fn submit<T: ContactTransport>(&mut self, now: f64, transport: &mut T) -> SubmitResult {
        self.submitted_once = true;
        let submission = match self.draft.validate() {
            Ok(s) => s,
            Err(errors) => {
                self.errors = errors;
                return SubmitResult::Invalid;
            }
        };
        self.errors = FieldErrors::default();

        match transport.dispatch(&submission) {
            Ok(()) => {
                self.pending_deliveries += 1;
                self.draft = ContactDraft::default();
                self.submitted_once = false;
                self.phase = FormPhase::Succeeded {
                    until: now + SUCCESS_DISPLAY_SECS,
                };
                SubmitResult::Sent
            }
            Err(e) => SubmitResult::DispatchFailed(e),
        }
    }

    /// Re-check a single field after an edit, once errors have been shown.
    pub fn revalidate(&mut self, field: ContactField) {
        if !self.submitted_once {
            return;
        }
        match self.draft.check(field) {
            Some(msg) => self.errors.set(field, msg),
            None => self.errors.clear_field(field),
        }
    }

    pub fn set_domain(&mut self, domain: Domain) {
        self.draft.domain = Some(domain);
        self.revalidate(ContactField::Domain);
    }

    /// Expire the success panel.
    pub fn tick(&mut self, now: f64) {
        if let FormPhase::Succeeded { until } = self.phase {
            if now >= until {
                self.phase = FormPhase::Editing;
            }
        }
    }

    pub fn dismiss_success(&mut self) {
        self.phase = FormPhase::Editing;
    }

    pub fn is_success(&self) -> bool {
        matches!(self.phase, FormPhase::Succeeded { .. })
    }

    pub fn record_delivery(&mut self, outcome: DeliveryOutcome) {
        self.pending_deliveries = self.pending_deliveries.saturating_sub(1);
        self.last_delivery = Some(outcome);
    }

    pub fn pending_deliveries(&self) -> u32 {
        self.pending_deliveries
    }
}
