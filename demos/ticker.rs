//! # Timer-driven pipeline
//!
//! Polls a fake sensor every 50ms, smooths it and broadcasts only the
//! readings that move past a threshold band.
//!
//! Shows:
//! - `FuncSource` with a configured refresh period
//! - `Chain` of a statistics filter and a `FirstMatch` collar
//! - Two subscribers reading at their own pace
//! - Graceful shutdown with `close`
//!
//! ## Run
//! ```bash
//! cargo run --example ticker
//! ```

use std::time::Duration;

use pipecast::{
    AboveFloat64, BelowFloat64, Chain, FirstMatch, FuncSource, LowPass, Pipeline, PipelineConfig,
    Value,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = PipelineConfig::named("sensor");
    cfg.refresh = Duration::from_millis(50);

    let mut t = 0.0_f64;
    let source = FuncSource::from_config(&cfg, move || {
        t += 0.3;
        Value::from(t.sin() * 10.0)
    })
    .with_name("sine");

    let filter = Chain::new()
        .then(LowPass::new(0.5))
        .then(FirstMatch::or(AboveFloat64::new(5.0), BelowFloat64::new(-5.0)));

    let pipeline = Pipeline::builder(cfg).with_filter(filter).spawn(source);

    let mut fast = pipeline.subscribe();
    let fast_reader = tokio::spawn(async move {
        for _ in 0..10 {
            let v = fast.recv().await;
            println!(" ├─► fast: {v}");
        }
    });

    let mut slow = pipeline.subscribe();
    let slow_reader = tokio::spawn(async move {
        for _ in 0..5 {
            let v = slow.recv().await;
            println!(" ├─► slow: {v}");
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    });

    fast_reader.await?;
    slow_reader.await?;

    pipeline.close().await?;
    println!(" └─► closed after {} published values", pipeline.published());
    Ok(())
}
