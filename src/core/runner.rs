//! # Driving loop of a pipeline.
//!
//! Pulls raw values from a [`Source`], runs them through the [`Filter`] and
//! publishes accepted results to the [`Observer`].
//!
//! ## Flow
//! ```text
//! loop {
//!   select! (biased) {
//!     stop requested   ─► return Stopped            (token dropped = ack)
//!     source.next()    ─► None ─► return SourceClosed
//!                      └► Some(raw)
//!   }
//!   decide(filter, raw)   (panics caught)
//!     ├─ Ok(Some(v)) ─► observer.notify(v)
//!     ├─ Ok(None)    ─► rejected, nothing to publish
//!     └─ Err(fault)  ─► FaultPolicy::Reject ─► warn, continue
//!                       FaultPolicy::Stop   ─► error, return Faulted
//! }
//! ```
//!
//! ## Rules
//! - The stop branch is polled **first**: once a stop is requested no further
//!   input is processed.
//! - `notify` only runs inside the loop, so after `close` has returned no
//!   further value is published.
//! - The filter is only ever touched by this task.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::core::control::ControlToken;
use crate::error::FilterError;
use crate::filters::Filter;
use crate::observer::Observer;
use crate::policies::FaultPolicy;
use crate::sources::Source;
use crate::value::Value;

/// Why the driving loop of a pipeline exited.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum LoopExit {
    /// A stop was requested through the controller.
    Stopped,
    /// The source reported it has no more values.
    SourceClosed,
    /// A filter fault under [`FaultPolicy::Stop`].
    Faulted(FilterError),
}

/// Runs the loop until stopped, the source ends, or a fault escalates.
///
/// The exit reason is recorded on the [`ControlToken`], which is then
/// consumed, acknowledging any closer.
pub(crate) async fn drive<S, F>(
    mut source: S,
    mut filter: F,
    observer: Arc<Observer>,
    token: ControlToken,
    policy: FaultPolicy,
) -> LoopExit
where
    S: Source,
    F: Filter,
{
    tracing::debug!(source = source.name(), policy = policy.as_label(), "pipeline started");

    let exit = loop {
        let raw = tokio::select! {
            biased;
            _ = token.stopped() => break LoopExit::Stopped,
            raw = source.next() => raw,
        };
        let Some(raw) = raw else {
            break LoopExit::SourceClosed;
        };

        match decide(&mut filter, raw) {
            Ok(Some(value)) => observer.notify(value),
            Ok(None) => {}
            Err(fault) => match policy {
                FaultPolicy::Reject => {
                    tracing::warn!(
                        label = fault.as_label(),
                        error = %fault.as_message(),
                        "filter fault, value rejected"
                    );
                }
                FaultPolicy::Stop => {
                    tracing::error!(
                        label = fault.as_label(),
                        error = %fault.as_message(),
                        "filter fault, stopping pipeline"
                    );
                    break LoopExit::Faulted(fault);
                }
            },
        }
    };

    tracing::debug!(exit = ?exit, published = observer.published(), "pipeline stopped");
    token.finish(exit.clone());
    exit
}

/// Runs `check` then `update` on one raw value.
///
/// Returns the value to publish, `None` for a rejection, or the fault. A panic
/// inside the filter is reported as [`FilterError::Panicked`].
pub(crate) fn decide<F: Filter + ?Sized>(
    filter: &mut F,
    raw: Value,
) -> Result<Option<Value>, FilterError> {
    catch_unwind(AssertUnwindSafe(|| -> Result<Option<Value>, FilterError> {
        if filter.check(&raw)? {
            Ok(Some(filter.update(raw)))
        } else {
            Ok(None)
        }
    }))
    .unwrap_or_else(|panic| {
        Err(FilterError::Panicked {
            info: panic_message(panic.as_ref()),
        })
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Control;
    use crate::filters::{AboveFloat64, OnChange, Pass};
    use crate::sources::ChanSource;

    struct Boom;

    impl Filter for Boom {
        fn check(&mut self, value: &Value) -> Result<bool, FilterError> {
            if value.as_str() == Some("boom") {
                panic!("boom");
            }
            Ok(true)
        }

        fn update(&mut self, value: Value) -> Value {
            value
        }
    }

    #[test]
    fn test_decide_outcomes() {
        let mut f = OnChange::new();
        assert_eq!(decide(&mut f, Value::Int(1)), Ok(Some(Value::Int(1))));
        assert_eq!(decide(&mut f, Value::Int(1)), Ok(None));

        let mut f = AboveFloat64::new(0.0);
        assert!(matches!(
            decide(&mut f, Value::from("x")),
            Err(FilterError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_decide_catches_panics() {
        let mut f = Boom;
        assert_eq!(
            decide(&mut f, Value::from("boom")),
            Err(FilterError::Panicked {
                info: "boom".to_string()
            })
        );
        assert_eq!(decide(&mut f, Value::Int(1)), Ok(Some(Value::Int(1))));
    }

    #[tokio::test]
    async fn test_source_exhaustion_ends_loop_and_acks() {
        let (control, token) = Control::pair(None);
        let observer = Arc::new(Observer::with_control(control));
        let mut sub = observer.subscribe();
        let (tx, src) = ChanSource::channel(4);

        tx.send(Value::Int(1)).await.unwrap();
        drop(tx);

        let exit = drive(src, Pass, Arc::clone(&observer), token, FaultPolicy::Reject).await;
        assert_eq!(exit, LoopExit::SourceClosed);
        assert!(observer.control().is_stopped());
        assert_eq!(observer.control().exit(), Some(&LoopExit::SourceClosed));
        assert_eq!(sub.try_recv(), Some(Value::Int(1)));
    }

    #[tokio::test]
    async fn test_reject_policy_keeps_running() {
        let (control, token) = Control::pair(None);
        let observer = Arc::new(Observer::with_control(control));
        let mut sub = observer.subscribe();
        let (tx, src) = ChanSource::channel(4);

        for v in [Value::Float(1.0), Value::from("bad"), Value::Float(2.0)] {
            tx.send(v).await.unwrap();
        }
        drop(tx);

        let exit = drive(src, AboveFloat64::new(0.0), observer, token, FaultPolicy::Reject).await;
        assert_eq!(exit, LoopExit::SourceClosed);
        assert_eq!(sub.try_recv(), Some(Value::Float(1.0)));
        assert_eq!(sub.try_recv(), Some(Value::Float(2.0)));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn test_stop_policy_escalates() {
        let (control, token) = Control::pair(None);
        let observer = Arc::new(Observer::with_control(control));
        let mut sub = observer.subscribe();
        let (tx, src) = ChanSource::channel(4);

        for v in [Value::Float(1.0), Value::from("bad"), Value::Float(2.0)] {
            tx.send(v).await.unwrap();
        }

        let exit = drive(src, AboveFloat64::new(0.0), observer, token, FaultPolicy::Stop).await;
        assert!(matches!(exit, LoopExit::Faulted(FilterError::TypeMismatch { .. })));
        assert_eq!(sub.try_recv(), Some(Value::Float(1.0)));
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn test_pending_stop_wins_over_ready_input() {
        let (control, token) = Control::pair(None);
        let observer = Arc::new(Observer::with_control(control));
        let (tx, src) = ChanSource::channel(4);
        tx.send(Value::Int(1)).await.unwrap();

        observer.control().request_stop();
        let exit = drive(src, Pass, Arc::clone(&observer), token, FaultPolicy::Reject).await;
        assert_eq!(exit, LoopExit::Stopped);
        assert_eq!(observer.published(), 0);
    }
}
