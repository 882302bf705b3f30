//! WhatsApp delivery of buyback submissions through the Fonnte gateway.
//!
//! - [`FonnteConfig`]: token, admin target and request settings.
//! - [`FonnteClient`]: single requests against the send endpoint.
//! - [`PhotoSender`]: the two photo transports (multipart file, URL).
//! - [`Dispatcher`]: text first, then photos, best effort per photo.

pub mod client;
pub mod config;
pub mod dispatch;
pub mod photo;

#[cfg(test)]
mod testing;

pub use client::{FonnteClient, FonnteError};
pub use config::{ConfigError, FonnteConfig};
pub use dispatch::{DispatchError, DispatchReport, DispatchSummary, Dispatcher, PhotoOutcome};
pub use photo::{MultipartPhotoSender, PhotoFile, PhotoSender, UrlPhotoSender};
