//! The submission record and the assembler that creates it.
//!
//! A [`Submission`] is built exactly once from a validated [`NewSubmission`]
//! and is not modified by the delivery path afterwards. Photos travel next to
//! the record, never inside it.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ticket::TicketGenerator;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Initial status of every new submission.
pub const STATUS_PENDING: &str = "pending";
/// An admin reached out to the seller.
pub const STATUS_CONTACTED: &str = "contacted";
/// The device was bought.
pub const STATUS_COMPLETED: &str = "completed";
/// The seller or admin dropped the request.
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid submission statuses.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_CONTACTED,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid submission status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One seller's sell request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ticket_number: String,
    pub category: String,
    pub brand: String,
    pub model: String,
    pub year_released: i32,
    pub physical_condition: String,
    #[serde(default)]
    pub functional_features: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    pub full_name: String,
    pub whatsapp: String,
    #[serde(default)]
    pub email: Option<String>,
    pub full_address: String,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: Timestamp,
    #[serde(default = "chrono::Utc::now")]
    pub updated_at: Timestamp,
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

impl Submission {
    /// Map link for the seller's pinned location, when both coordinates exist.
    pub fn map_url(&self) -> Option<String> {
        match (self.location_lat, self.location_lng) {
            (Some(lat), Some(lng)) => Some(format!("https://maps.google.com/?q={lat},{lng}")),
            _ => None,
        }
    }
}

/// Form payload as submitted by the sell form, before identity is assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year_released: Option<i32>,
    #[serde(default)]
    pub physical_condition: String,
    #[serde(default)]
    pub functional_features: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_address: String,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
}

/// Strip everything but ASCII digits from a phone number.
pub fn normalize_whatsapp(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Generate an opaque local identifier (`sub_` + time-ordered UUID).
pub fn generate_submission_id() -> String {
    format!("sub_{}", uuid::Uuid::now_v7().simple())
}

// ---------------------------------------------------------------------------
// Assembler
// ---------------------------------------------------------------------------

/// Build the immutable record from a validated form payload.
///
/// Assigns the id and ticket number, normalizes the WhatsApp number, drops a
/// blank email and trims free-text fields. Run
/// [`crate::validation::validate_new_submission`] first; this function does
/// not check form rules.
pub fn assemble(input: NewSubmission, tickets: &TicketGenerator, now: Timestamp) -> Submission {
    let email = input
        .email
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());

    Submission {
        id: generate_submission_id(),
        ticket_number: tickets.generate_with(now, &mut rand::rng()),
        category: input.category,
        brand: input.brand.trim().to_string(),
        model: input.model.trim().to_string(),
        year_released: input.year_released.unwrap_or_default(),
        physical_condition: input.physical_condition,
        functional_features: input.functional_features,
        accessories: input.accessories,
        full_name: input.full_name.trim().to_string(),
        whatsapp: normalize_whatsapp(&input.whatsapp),
        email,
        full_address: input.full_address.trim().to_string(),
        location_lat: input.location_lat,
        location_lng: input.location_lng,
        status: STATUS_PENDING.to_string(),
        created_at: now,
        updated_at: now,
    }
}
