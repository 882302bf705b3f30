use std::sync::Arc;

use jualputus_core::message::MessageFormatter;
use jualputus_core::ticket::TicketGenerator;
use jualputus_db::SubmissionRepo;
use jualputus_whatsapp::{
    ConfigError, DispatchError, Dispatcher, FonnteClient, FonnteConfig, MultipartPhotoSender,
    UrlPhotoSender,
};

use crate::config::ServerConfig;
use crate::error::AppError;

/// Admin WhatsApp delivery, one dispatcher per photo transport.
#[derive(Debug, Clone)]
pub struct WhatsApp {
    /// Photos uploaded as multipart files.
    pub uploads: Dispatcher<MultipartPhotoSender>,
    /// Photos given as URLs or data URIs.
    pub links: Dispatcher<UrlPhotoSender>,
}

impl WhatsApp {
    pub fn new(client: FonnteClient, formatter: MessageFormatter) -> Self {
        Self {
            uploads: Dispatcher::multipart(client.clone(), formatter),
            links: Dispatcher::url(client, formatter),
        }
    }

    pub fn from_config(
        config: FonnteConfig,
        formatter: MessageFormatter,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(FonnteClient::new(config)?, formatter))
    }
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Submission store chosen at startup.
    pub store: Arc<dyn SubmissionRepo>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Delivery, or the reason it is unavailable. The server runs either way.
    pub whatsapp: Arc<Result<WhatsApp, ConfigError>>,
    /// Ticket numbers for newly assembled submissions.
    pub tickets: Arc<TicketGenerator>,
}

impl AppState {
    /// The configured delivery, or a 503-mapped error naming what is missing.
    pub fn whatsapp(&self) -> Result<&WhatsApp, AppError> {
        match &*self.whatsapp {
            Ok(whatsapp) => Ok(whatsapp),
            Err(e) => Err(DispatchError::NotConfigured(e.clone()).into()),
        }
    }

    pub fn whatsapp_configured(&self) -> bool {
        self.whatsapp.is_ok()
    }
}
