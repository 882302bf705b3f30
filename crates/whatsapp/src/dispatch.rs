//! Submission delivery to the admin's WhatsApp.
//!
//! One pass per submission, no retries:
//!
//! 1. Reject a record without a ticket number.
//! 2. Send the formatted text. Failure aborts the whole delivery and no
//!    photo is attempted.
//! 3. Send each photo in order, one request at a time. Each outcome is
//!    recorded in the [`DispatchReport`]; a failed photo never stops the
//!    loop or fails the delivery.

use std::time::Duration;

use jualputus_core::message::{photo_caption, MessageFormatter};
use jualputus_core::submission::Submission;
use serde::Serialize;

use crate::client::{FonnteClient, FonnteError};
use crate::config::ConfigError;
use crate::photo::{MultipartPhotoSender, PhotoSender, UrlPhotoSender};

// ---------------------------------------------------------------------------
// Errors and results
// ---------------------------------------------------------------------------

/// Why a submission could not be delivered.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Token or admin number missing; nothing was sent.
    #[error(transparent)]
    NotConfigured(#[from] ConfigError),

    /// The record lacks a required identity field; nothing was sent.
    #[error("Invalid submission data: {0}")]
    InvalidSubmission(String),

    /// The text message failed; no photos were sent.
    #[error("Failed to send message: {0}")]
    TextSend(#[source] FonnteError),
}

/// Outcome of one photo send.
#[derive(Debug)]
pub struct PhotoOutcome {
    /// Zero-based position in the submitted photo list.
    pub index: usize,
    pub result: Result<(), FonnteError>,
}

impl PhotoOutcome {
    pub fn is_sent(&self) -> bool {
        self.result.is_ok()
    }
}

/// Result of a delivery whose text message went through.
#[derive(Debug)]
pub struct DispatchReport {
    pub ticket_number: String,
    pub photos: Vec<PhotoOutcome>,
}

impl DispatchReport {
    pub fn photos_sent(&self) -> usize {
        self.photos.iter().filter(|p| p.is_sent()).count()
    }

    pub fn photos_failed(&self) -> usize {
        self.photos.len() - self.photos_sent()
    }

    /// Serializable summary for API responses.
    pub fn summary(&self) -> DispatchSummary {
        DispatchSummary {
            ticket_number: self.ticket_number.clone(),
            photos_sent: self.photos_sent(),
            photos_failed: self.photos_failed(),
            failed_photos: self
                .photos
                .iter()
                .filter_map(|p| {
                    p.result.as_ref().err().map(|e| FailedPhoto {
                        photo: p.index + 1,
                        error: e.to_string(),
                    })
                })
                .collect(),
        }
    }
}

/// Per-submission delivery counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub ticket_number: String,
    pub photos_sent: usize,
    pub photos_failed: usize,
    pub failed_photos: Vec<FailedPhoto>,
}

/// A photo that did not go through, numbered from 1 like its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPhoto {
    pub photo: usize,
    pub error: String,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Delivers submissions through one photo transport.
#[derive(Debug, Clone)]
pub struct Dispatcher<S> {
    client: FonnteClient,
    photos: S,
    formatter: MessageFormatter,
    photo_delay: Duration,
}

impl Dispatcher<MultipartPhotoSender> {
    /// Dispatcher that uploads photos as multipart files.
    pub fn multipart(client: FonnteClient, formatter: MessageFormatter) -> Self {
        let sender = MultipartPhotoSender::new(client.clone());
        Self::new(client, sender, formatter)
    }
}

impl Dispatcher<UrlPhotoSender> {
    /// Dispatcher that sends photos as URL / data URI strings.
    pub fn url(client: FonnteClient, formatter: MessageFormatter) -> Self {
        let sender = UrlPhotoSender::new(client.clone());
        Self::new(client, sender, formatter)
    }
}

impl<S: PhotoSender> Dispatcher<S> {
    pub fn new(client: FonnteClient, photos: S, formatter: MessageFormatter) -> Self {
        let photo_delay = client.config().photo_delay;
        Self {
            client,
            photos,
            formatter,
            photo_delay,
        }
    }

    pub fn client(&self) -> &FonnteClient {
        &self.client
    }

    /// Override the pause between photo sends.
    pub fn with_photo_delay(mut self, delay: Duration) -> Self {
        self.photo_delay = delay;
        self
    }

    /// Deliver `submission` and its `photos`.
    pub async fn dispatch(
        &self,
        submission: &Submission,
        photos: &[S::Photo],
    ) -> Result<DispatchReport, DispatchError> {
        let ticket = submission.ticket_number.trim();
        if ticket.is_empty() {
            return Err(DispatchError::InvalidSubmission(
                "missing ticket number".to_string(),
            ));
        }

        let message = self.formatter.format(submission, Some(photos.len()));

        tracing::info!(ticket, photo_count = photos.len(), "Sending submission to admin WhatsApp");
        if let Err(e) = self.client.send_text(&message).await {
            tracing::error!(ticket, error = %e, "Admin message failed, skipping photos");
            return Err(DispatchError::TextSend(e));
        }
        tracing::info!(ticket, "Admin message sent");

        let mut outcomes = Vec::with_capacity(photos.len());
        for (index, photo) in photos.iter().enumerate() {
            if index > 0 && !self.photo_delay.is_zero() {
                tokio::time::sleep(self.photo_delay).await;
            }

            let caption = photo_caption(index, ticket);
            let result = self.photos.send_photo(photo, &caption).await;
            match &result {
                Ok(()) => tracing::info!(
                    ticket,
                    photo = index + 1,
                    transport = self.photos.transport(),
                    "Photo sent"
                ),
                Err(e) => tracing::warn!(
                    ticket,
                    photo = index + 1,
                    transport = self.photos.transport(),
                    error = %e,
                    "Photo failed, continuing with the rest"
                ),
            }
            outcomes.push(PhotoOutcome { index, result });
        }

        let report = DispatchReport {
            ticket_number: ticket.to_string(),
            photos: outcomes,
        };
        tracing::info!(
            ticket,
            photos_sent = report.photos_sent(),
            photos_failed = report.photos_failed(),
            "Submission delivered"
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
