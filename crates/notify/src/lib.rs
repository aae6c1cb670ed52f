//! Outbound announcement of newly created projects.
//!
//! [`ProjectNotifier`] is the seam the create handler talks to;
//! [`telegram::TelegramNotifier`] is the production channel.

pub mod error;
pub mod telegram;

use async_trait::async_trait;
use folio_core::notice::NewProjectNotice;

pub use error::NotifyError;
pub use telegram::{TelegramConfig, TelegramNotifier};

/// Publishes a [`NewProjectNotice`] to an external channel.
///
/// Exactly one outbound request per call; implementations never retry.
#[async_trait]
pub trait ProjectNotifier: Send + Sync {
    async fn notify(&self, notice: &NewProjectNotice) -> Result<(), NotifyError>;
}
