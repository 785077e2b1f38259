//! # Channel-fed pipeline
//!
//! Pushes values from the application into a pipeline and prints the ones
//! that change. The pipeline stops on its own once the sender is dropped.
//!
//! ## Run
//! ```bash
//! cargo run --example channel
//! ```

use std::time::Duration;

use futures::StreamExt;
use pipecast::{Chain, ChanSource, OnChange, Pipeline, Print};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, source) = ChanSource::channel(16);
    let pipeline = Pipeline::new(
        Chain::new()
            .then(OnChange::new())
            .then(Print::stdout("changed:")),
        source,
    );

    let changes = pipeline.subscribe().into_stream();

    for v in [1, 1, 2, 2, 2, 3, 1, 1] {
        tx.send(v.into()).await?;
    }
    drop(tx);

    let seen: Vec<_> = tokio::time::timeout(Duration::from_secs(1), changes.take(4).collect())
        .await?;
    println!("{} changes, loop stopped: {}", seen.len(), pipeline.is_stopped());
    Ok(())
}
