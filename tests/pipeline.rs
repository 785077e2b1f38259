use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use futures::StreamExt;
use pipecast::{
    AboveFloat64, Chain, ChanSource, FaultPolicy, Filter, FilterError, FirstMatch, FuncSource,
    LoopExit, MovingAverage, OnChange, OnValue, Pass, Pipeline, PipelineConfig, PipelineError,
    Value,
};

const WAIT: Duration = Duration::from_secs(2);

async fn wait_published(pipeline: &Pipeline, n: u64) {
    tokio::time::timeout(WAIT, async {
        while pipeline.published() < n {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("values published in time");
}

async fn wait_stopped(pipeline: &Pipeline) {
    tokio::time::timeout(WAIT, async {
        while !pipeline.is_stopped() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("loop exits in time");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_every_subscriber_sees_every_value_in_order() {
    let (tx, source) = ChanSource::channel(8);
    let pipeline = Pipeline::new(Pass, source);

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let mut sub = pipeline.subscribe();
            tokio::spawn(async move {
                let mut seen = Vec::new();
                for _ in 0..100 {
                    seen.push(sub.recv().await);
                }
                seen
            })
        })
        .collect();

    for i in 0..100 {
        tx.send(Value::from(i)).await.unwrap();
    }

    let expected: Vec<Value> = (0..100).map(Value::from).collect();
    for reader in readers {
        let seen = tokio::time::timeout(WAIT, reader).await.unwrap().unwrap();
        assert_eq!(seen, expected);
    }
    pipeline.close().await.unwrap();
}

#[tokio::test]
async fn test_late_subscriber_gets_no_history() {
    let (tx, source) = ChanSource::channel(8);
    let pipeline = Pipeline::new(Pass, source);

    for i in 0..3 {
        tx.send(Value::from(i)).await.unwrap();
    }
    wait_published(&pipeline, 3).await;

    let mut late = pipeline.subscribe();
    assert!(!late.is_ready());
    assert_eq!(late.try_recv(), None);

    tx.send(Value::from("fresh")).await.unwrap();
    assert_eq!(late.recv_timeout(WAIT).await, Ok(Value::from("fresh")));
    pipeline.close().await.unwrap();
}

#[tokio::test]
async fn test_composite_filter_over_channel() {
    let (tx, source) = ChanSource::channel(16);
    let filter = Chain::new()
        .then(OnChange::new())
        .then(FirstMatch::or(OnValue::new(3), AboveFloat64::new(9.5)));
    let pipeline = Pipeline::new(filter, source);
    let mut sub = pipeline.subscribe();

    for v in [1, 3, 3, 5, 10, 10, 3] {
        tx.send(Value::from(v)).await.unwrap();
    }
    drop(tx);
    wait_stopped(&pipeline).await;

    let got: Vec<Value> = std::iter::from_fn(|| sub.try_recv()).collect();
    assert_eq!(got, vec![Value::Int(3), Value::Int(10), Value::Int(3)]);
}

#[tokio::test]
async fn test_moving_average_pipeline() {
    let (tx, source) = ChanSource::channel(16);
    let pipeline = Pipeline::new(MovingAverage::new(2), source);
    let stream = pipeline.subscribe().into_stream();

    for v in [2.0, 4.0, 8.0] {
        tx.send(Value::from(v)).await.unwrap();
    }

    let got: Vec<Value> = tokio::time::timeout(WAIT, stream.take(3).collect())
        .await
        .unwrap();
    assert_eq!(
        got,
        vec![Value::Float(2.0), Value::Float(3.0), Value::Float(6.0)]
    );
    pipeline.close().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_func_source_publishes_on_refresh() {
    let mut cfg = PipelineConfig::named("counter");
    cfg.refresh = Duration::from_millis(100);

    let mut n = 0;
    let source = FuncSource::from_config(&cfg, move || {
        n += 1;
        Value::from(n / 2)
    })
    .with_name("halves");
    let pipeline = Pipeline::builder(cfg)
        .with_filter(OnChange::new())
        .spawn(source);
    let mut sub = pipeline.subscribe();

    // 1/2=0, 2/2=1, 3/2=1, 4/2=2
    assert_eq!(sub.recv().await, Value::Int(0));
    assert_eq!(sub.recv().await, Value::Int(1));
    assert_eq!(sub.recv().await, Value::Int(2));
    assert_eq!(pipeline.published(), 3);

    pipeline.close().await.unwrap();
}

#[tokio::test]
async fn test_close_stops_publishing() {
    let mut n = 0;
    let source = FuncSource::new(Duration::from_millis(1), move || {
        n += 1;
        Value::from(n)
    });
    let pipeline = Pipeline::new(Pass, source);
    let mut sub = pipeline.subscribe();
    sub.recv_timeout(WAIT).await.unwrap();

    tokio::time::timeout(WAIT, pipeline.close())
        .await
        .expect("close within two seconds")
        .unwrap();
    assert!(pipeline.is_stopped());

    let after_close = pipeline.published();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(pipeline.published(), after_close);
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let (_tx, source) = ChanSource::channel(1);
    let pipeline = Pipeline::new(Pass, source);

    assert_eq!(pipeline.exit(), None);
    assert_eq!(pipeline.close().await, Ok(()));
    assert_eq!(pipeline.exit(), Some(LoopExit::Stopped));
    let second = pipeline.close().await;
    assert_eq!(second, Err(PipelineError::AlreadyClosed));
    assert!(second.unwrap_err().is_already_closed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_close_has_one_winner() {
    let (_tx, source) = ChanSource::channel(1);
    let pipeline = Arc::new(Pipeline::new(Pass, source));

    let closers: Vec<_> = (0..4)
        .map(|_| {
            let p = Arc::clone(&pipeline);
            tokio::spawn(async move { p.close().await })
        })
        .collect();

    let mut ok = 0;
    for closer in closers {
        match closer.await.unwrap() {
            Ok(()) => ok += 1,
            Err(e) => assert!(e.is_already_closed()),
        }
    }
    assert_eq!(ok, 1);
}

#[tokio::test]
async fn test_close_after_source_exhausted() {
    let (tx, source) = ChanSource::channel(1);
    let pipeline = Pipeline::new(Pass, source);
    drop(tx);

    wait_stopped(&pipeline).await;
    assert_eq!(pipeline.exit(), Some(LoopExit::SourceClosed));
    assert_eq!(pipeline.close().await, Ok(()));
    assert_eq!(pipeline.exit(), Some(LoopExit::SourceClosed));
}

#[tokio::test]
async fn test_stop_policy_ends_pipeline_on_fault() {
    let (tx, source) = ChanSource::channel(4);
    let mut cfg = PipelineConfig::named("strict");
    cfg.fault_policy = FaultPolicy::Stop;
    let pipeline = Pipeline::builder(cfg)
        .with_filter(AboveFloat64::new(0.0))
        .spawn(source);
    let mut sub = pipeline.subscribe();

    tx.send(Value::from(1.5)).await.unwrap();
    tx.send(Value::from("not a number")).await.unwrap();
    wait_stopped(&pipeline).await;

    assert_eq!(sub.try_recv(), Some(Value::Float(1.5)));
    assert_eq!(sub.try_recv(), None);
    assert!(matches!(
        pipeline.exit(),
        Some(LoopExit::Faulted(FilterError::TypeMismatch {
            expected: "number",
            ..
        }))
    ));
    assert_eq!(pipeline.close().await, Ok(()));
}

struct PanicOnce {
    fired: Arc<AtomicBool>,
}

impl Filter for PanicOnce {
    fn check(&mut self, _value: &Value) -> Result<bool, FilterError> {
        if !self.fired.swap(true, Ordering::SeqCst) {
            panic!("first value is poison");
        }
        Ok(true)
    }

    fn update(&mut self, value: Value) -> Value {
        value
    }
}

#[tokio::test]
async fn test_reject_policy_survives_filter_panic() {
    let (tx, source) = ChanSource::channel(4);
    let fired = Arc::new(AtomicBool::new(false));
    let pipeline = Pipeline::new(
        PanicOnce {
            fired: Arc::clone(&fired),
        },
        source,
    );
    let mut sub = pipeline.subscribe();

    tx.send(Value::from(1)).await.unwrap();
    tx.send(Value::from(2)).await.unwrap();

    assert_eq!(sub.recv_timeout(WAIT).await, Ok(Value::Int(2)));
    assert!(fired.load(Ordering::SeqCst));
    assert!(!pipeline.is_stopped());
    pipeline.close().await.unwrap();
}
