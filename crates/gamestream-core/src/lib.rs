//! Lazy event streaming, aggregation, and sequence generators for the
//! GameStream demonstration.
//!
//! Every source in this crate is a pull-based [`Iterator`]: nothing is
//! computed until the consumer asks for the next value, and no source ever
//! holds storage proportional to the number of values it produces.
//!
//! # Modules
//!
//! - [`producer`] -- [`GameTables`] and the finite, restartable
//!   [`EventStream`].
//! - [`aggregate`] -- Single-pass [`Aggregator`] with a progress side
//!   channel ([`ProgressSink`]).
//! - [`sequence`] -- Infinite [`Fibonacci`] and [`Primes`] generators.
//! - [`config`] -- Configuration loading from `gamestream-config.yaml`.
//! - [`report`] -- The [`DemoReport`] printed by the runner.
//! - [`runner`] -- [`run_demo`], one end-to-end demonstration run.
//!
//! [`GameTables`]: producer::GameTables
//! [`EventStream`]: producer::EventStream
//! [`Aggregator`]: aggregate::Aggregator
//! [`ProgressSink`]: aggregate::ProgressSink
//! [`Fibonacci`]: sequence::Fibonacci
//! [`Primes`]: sequence::Primes
//! [`DemoReport`]: report::DemoReport
//! [`run_demo`]: runner::run_demo

pub mod aggregate;
pub mod config;
pub mod producer;
pub mod report;
pub mod runner;
pub mod sequence;
