//! # wxbench-orchestration
//!
//! Bounded-concurrency trials over the city catalog and the suite that
//! repeats them across pool sizes.

pub mod experiment;
pub mod interfaces;
pub mod suite;

pub use experiment::{Experiment, JoinPolicy, TrialFailure};
pub use interfaces::{ExperimentResult, NullPresenter, ResultPresenter};
pub use suite::ExperimentSuite;
