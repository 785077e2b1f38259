//! # Channel-backed source (`ChanSource`)
//!
//! [`ChanSource`] forwards values pushed into a bounded `mpsc` channel. When
//! every sender is dropped the source is exhausted and the pipeline's loop
//! exits on its own.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::sources::Source;
use crate::value::Value;

/// Inbound channel of raw values.
#[derive(Debug)]
pub struct ChanSource {
    rx: mpsc::Receiver<Value>,
}

impl ChanSource {
    /// Wraps an existing receiver.
    pub fn new(rx: mpsc::Receiver<Value>) -> Self {
        Self { rx }
    }

    /// Creates a channel of the given capacity (min 1) and returns both ends.
    pub fn channel(capacity: usize) -> (mpsc::Sender<Value>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::new(rx))
    }
}

impl From<mpsc::Receiver<Value>> for ChanSource {
    fn from(rx: mpsc::Receiver<Value>) -> Self {
        Self::new(rx)
    }
}

#[async_trait]
impl Source for ChanSource {
    async fn next(&mut self) -> Option<Value> {
        self.rx.recv().await
    }

    fn name(&self) -> &str {
        "chan"
    }
}
