//! # Decision units and their combinators.
//!
//! A [`Filter`] decides **whether** a raw value becomes a published event
//! (`check`) and **how** it is transformed (`update`). Filters compose:
//!
//! ```text
//!   raw ──► Chain ──► [OnChange] ──► [MovingAverage] ──► [FirstMatch] ──► published
//!                        │ check/update     │ check/update      │
//!                        └─ reject ─────────┴── reject ─────────┴──► dropped
//!
//!   FirstMatch: [AboveFloat64] ─┐
//!               [BelowFloat64] ─┼─► first acceptor wins (original input, not threaded)
//!               [   ...      ] ─┘
//! ```
//!
//! ## Contents
//! - [`Filter`] trait, [`Pass`] (explicit default), [`Sink`]
//! - [`Chain`] sequential AND with value threading
//! - [`FirstMatch`] ordered OR, first acceptor wins
//! - Triggers: [`OnChange`], [`OnValue`], [`AboveFloat64`], [`BelowFloat64`], [`Mute`]
//! - Statistics: [`MovingAverage`], [`Stddev`], [`Sigma`], [`LowPass`]
//! - [`Print`] tap that writes every accepted value

mod chain;
mod filter;
mod print;
mod stats;
mod switch;
mod trigger;

pub use chain::Chain;
pub use filter::{Filter, Pass, Sink};
pub use print::Print;
pub use stats::{LowPass, MovingAverage, Sigma, Stddev};
pub use switch::FirstMatch;
pub use trigger::{AboveFloat64, BelowFloat64, Mute, OnChange, OnValue};
