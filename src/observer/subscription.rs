//! # Subscription cursor.
//!
//! A [`Subscription`] points at one node of the published-state chain. The
//! low-level protocol mirrors the chain itself:
//!
//! ```text
//! loop {
//!   ├─► sub.ready().wait().await      (suspend until the node is published)
//!   ├─► sub.value()                   (frozen value, Some once ready)
//!   └─► sub.next()                    (advance exactly one node)
//! }
//! ```
//!
//! [`Subscription::recv`] bundles the three steps. A cursor that never
//! advances keeps its node (and every later node) alive; that costs memory
//! but is never an error.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::Stream;

use crate::error::PipelineError;
use crate::observer::ReadySignal;
use crate::observer::state::State;
use crate::value::Value;

/// Per-subscriber position in the sequence of published values.
///
/// Cloning forks the cursor: both copies start at the same position and
/// advance independently.
#[derive(Clone)]
pub struct Subscription {
    state: Arc<State>,
}

impl Subscription {
    pub(crate) fn new(state: Arc<State>) -> Self {
        Self { state }
    }

    /// Value of the current node, or `None` while it is still pending.
    pub fn value(&self) -> Option<&Value> {
        self.state.published().map(|p| &p.value)
    }

    /// Advances to the next node.
    ///
    /// Returns `false` (and stays put) if the current node is not ready yet.
    pub fn next(&mut self) -> bool {
        let next = match self.state.published() {
            Some(p) => Arc::clone(&p.next),
            None => return false,
        };
        self.state = next;
        true
    }

    /// Readiness latch of the current node.
    pub fn ready(&self) -> ReadySignal {
        self.state.ready().clone()
    }

    /// True if the current node has been published.
    pub fn is_ready(&self) -> bool {
        self.state.ready().is_ready()
    }

    /// Waits until the current node is published, without advancing.
    pub async fn changed(&self) {
        self.state.ready().wait().await;
    }

    /// Takes the current value and advances, if it is already published.
    pub fn try_recv(&mut self) -> Option<Value> {
        let value = self.value().cloned()?;
        self.next();
        Some(value)
    }

    /// Waits for the next value, returns it and advances.
    ///
    /// Cancel-safe: if the future is dropped before completing, the cursor has
    /// not moved.
    pub async fn recv(&mut self) -> Value {
        loop {
            if let Some(value) = self.try_recv() {
                return value;
            }
            self.changed().await;
        }
    }

    /// Like [`Subscription::recv`], but gives up after `timeout`.
    ///
    /// A timeout leaves the cursor where it was.
    pub async fn recv_timeout(&mut self, timeout: Duration) -> Result<Value, PipelineError> {
        tokio::time::timeout(timeout, self.recv())
            .await
            .map_err(|_elapsed| PipelineError::Timeout { timeout })
    }

    /// Converts the cursor into an endless stream of values.
    ///
    /// The stream does not end when the pipeline closes; bound it with
    /// `take`, `take_until` or a timeout.
    pub fn into_stream(self) -> impl Stream<Item = Value> + Send + 'static {
        futures::stream::unfold(self, |mut sub| async move {
            let value = sub.recv().await;
            Some((value, sub))
        })
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("ready", &self.is_ready())
            .field("value", &self.value())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::Observer;
    use futures::StreamExt;

    #[test]
    fn test_next_on_pending_node_stays_put() {
        let observer = Observer::new();
        let mut sub = observer.subscribe();

        assert!(!sub.is_ready());
        assert!(!sub.next());
        assert!(sub.value().is_none());

        observer.notify(Value::Int(7));
        assert!(sub.is_ready());
        assert_eq!(sub.value(), Some(&Value::Int(7)));
        assert!(sub.next());
        assert!(sub.value().is_none());
    }

    #[test]
    fn test_clone_forks_cursor() {
        let observer = Observer::new();
        let mut a = observer.subscribe();
        observer.notify(Value::Int(1));
        observer.notify(Value::Int(2));

        assert_eq!(a.try_recv(), Some(Value::Int(1)));
        let mut b = a.clone();
        assert_eq!(a.try_recv(), Some(Value::Int(2)));
        assert_eq!(b.try_recv(), Some(Value::Int(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recv_timeout_leaves_cursor_in_place() {
        let observer = Observer::new();
        let mut sub = observer.subscribe();

        let err = sub
            .recv_timeout(Duration::from_millis(20))
            .await
            .unwrap_err();
        assert_eq!(err.as_label(), "subscriber_timeout");

        observer.notify(Value::Int(1));
        assert_eq!(sub.recv().await, Value::Int(1));
    }

    #[tokio::test]
    async fn test_into_stream() {
        let observer = Observer::new();
        let stream = observer.subscribe().into_stream();
        for i in 0..3 {
            observer.notify(Value::Int(i));
        }
        let got: Vec<Value> = stream.take(3).collect().await;
        assert_eq!(got, vec![Value::Int(0), Value::Int(1), Value::Int(2)]);
    }

    #[tokio::test]
    async fn test_ready_signal_observed_then_value() {
        let observer = Arc::new(Observer::new());
        let mut sub = observer.subscribe();
        let signal = sub.ready();

        let waiter = tokio::spawn(async move {
            signal.wait().await;
        });
        observer.notify(Value::Bool(true));
        waiter.await.unwrap();

        assert_eq!(sub.value(), Some(&Value::Bool(true)));
        assert!(sub.next());
    }
}
