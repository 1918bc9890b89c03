//! Explicit handle over the session-change notification stream.

use crate::SessionEvent;

use log::warn;
use tokio::sync::broadcast;

/// A live subscription to session-change events. Receiving ends when
/// [`stop`](Self::stop) is called, the handle is dropped, or the provider
/// side goes away.
pub struct SessionSubscription {
    rx: Option<broadcast::Receiver<SessionEvent>>,
}

impl SessionSubscription {
    pub(crate) fn new(rx: broadcast::Receiver<SessionEvent>) -> Self {
        Self { rx: Some(rx) }
    }

    /// The next session-change event, or `None` once the subscription is
    /// stopped or closed. Events missed under lag are skipped, never
    /// fabricated.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        let rx = self.rx.as_mut()?;
        loop {
            match rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("session subscription lagged, skipped {skipped} event(s)");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    /// Release the subscription; subsequent `next()` calls return `None`.
    pub fn stop(&mut self) {
        self.rx = None;
    }

    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }
}
