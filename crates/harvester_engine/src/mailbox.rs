use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::time::Instant;

/// One completed network response, as captured by the page driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    pub url: String,
    pub status: u16,
    /// `Err` carries the reason the body could not be read.
    pub body: Result<Vec<u8>, String>,
}

impl CapturedResponse {
    pub fn ok(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            body: Ok(body.into()),
        }
    }
}

/// Whether a response belongs to one of the harvested timeline endpoints.
pub fn is_timeline_endpoint(url: &str) -> bool {
    url.contains("api/graphql") && (url.contains("SearchTimeline") || url.contains("UserTweets"))
}

/// Handle the page driver uses to push responses into the session.
#[derive(Debug, Clone)]
pub struct ResponseSender {
    tx: SyncSender<CapturedResponse>,
}

impl ResponseSender {
    /// Blocks while the mailbox is full. Returns `false` once the session is gone.
    pub fn deliver(&self, response: CapturedResponse) -> bool {
        self.tx.send(response).is_ok()
    }
}

/// Bounded queue between the page driver (producer) and the session (sole consumer).
pub struct ResponseMailbox {
    tx: SyncSender<CapturedResponse>,
    rx: Receiver<CapturedResponse>,
}

impl ResponseMailbox {
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel(capacity.max(1));
        Self { tx, rx }
    }

    pub fn sender(&self) -> ResponseSender {
        ResponseSender {
            tx: self.tx.clone(),
        }
    }

    /// Hands every response to `handle` until `deadline`, including ones
    /// that arrive while waiting. Returns early only on a handler error.
    pub fn drain_until<E>(
        &self,
        deadline: Instant,
        mut handle: impl FnMut(CapturedResponse) -> Result<(), E>,
    ) -> Result<(), E> {
        loop {
            self.drain_ready(&mut handle)?;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            match self.rx.recv_timeout(remaining) {
                Ok(response) => handle(response)?,
                // The mailbox holds a sender itself, so this is only a timeout.
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return Ok(())
                }
            }
        }
    }

    /// Hands every already queued response to `handle` without waiting.
    pub fn drain_ready<E>(
        &self,
        mut handle: impl FnMut(CapturedResponse) -> Result<(), E>,
    ) -> Result<(), E> {
        while let Ok(response) = self.rx.try_recv() {
            handle(response)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn timeline_endpoints_are_recognized() {
        assert!(is_timeline_endpoint(
            "https://x.com/i/api/graphql/abc/SearchTimeline?variables=1"
        ));
        assert!(is_timeline_endpoint("https://x.com/i/api/graphql/abc/UserTweets"));
        assert!(!is_timeline_endpoint("https://x.com/i/api/graphql/abc/HomeTimeline"));
        assert!(!is_timeline_endpoint("https://x.com/SearchTimeline"));
    }

    #[test]
    fn drain_until_collects_responses_arriving_during_the_wait() {
        let mailbox = ResponseMailbox::bounded(4);
        let sender = mailbox.sender();
        sender.deliver(CapturedResponse::ok("a", "1"));
        let late = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(10));
            sender.deliver(CapturedResponse::ok("b", "2"));
        });

        let mut seen = Vec::new();
        let deadline = Instant::now() + Duration::from_millis(500);
        let result = mailbox.drain_until(deadline, |r| {
            seen.push(r.url);
            Ok::<(), ()>(())
        });
        assert!(result.is_ok());
        late.join().unwrap();
        assert_eq!(seen, vec!["a".to_string(), "b".to_string()]);
    }
}
