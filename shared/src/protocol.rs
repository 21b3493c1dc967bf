use serde::{Deserialize, Serialize};

/// Path of the contact submission endpoint.
pub const CONTACT_PATH: &str = "/api/contact";

/// Fixed acknowledgment message returned for every submission.
pub const CONTACT_ACK_MESSAGE: &str = "Form submitted successfully!";

/// Category the visitor is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Internship,
    Course,
    ResearchPaper,
    Other,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Internship,
        Domain::Course,
        Domain::ResearchPaper,
        Domain::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Domain::Internship => "Internship",
            Domain::Course => "Course",
            Domain::ResearchPaper => "Research Paper",
            Domain::Other => "Other",
        }
    }

    /// The option after `current` in the select list, wrapping around.
    pub fn next(current: Option<Domain>) -> Domain {
        match current {
            None => Domain::ALL[0],
            Some(d) => {
                let idx = Domain::ALL.iter().position(|x| *x == d).unwrap_or(0);
                Domain::ALL[(idx + 1) % Domain::ALL.len()]
            }
        }
    }
}

/// A validated contact form submission as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub domain: Domain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Body of every `POST /api/contact` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactAck {
    pub success: bool,
    pub message: String,
}

impl ContactAck {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: CONTACT_ACK_MESSAGE.to_string(),
        }
    }
}
