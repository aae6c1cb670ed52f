/// Error type for notification delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The bot API answered with a non-2xx status code.
    #[error("Telegram returned HTTP {status}: {description}")]
    HttpStatus { status: u16, description: String },
}
