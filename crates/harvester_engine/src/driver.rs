use std::time::Duration;

use thiserror::Error;

use crate::mailbox::ResponseSender;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },
    #[error("browser error: {0}")]
    Browser(String),
}

/// Page automation the session relies on: navigation, the login check,
/// page advancement and response capture.
///
/// Responses are pushed into the [`ResponseSender`] handed to
/// [`PageDriver::listen`], from any thread and at any time until
/// [`PageDriver::stop_listening`].
pub trait PageDriver {
    fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Waits up to `timeout` for the logged-in UI; `false` on timeout.
    fn await_login_confirmation(&mut self, timeout: Duration) -> bool;

    fn listen(&mut self, responses: ResponseSender);

    fn stop_listening(&mut self);

    /// Advances the view by one page and strips heavy media from it.
    fn trigger_next_page(&mut self);

    fn close(&mut self);
}
