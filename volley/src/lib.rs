#![cfg_attr(docsrs, feature(doc_cfg))]
//! Fixed-rate HTTP load generation.
//!
//! Issues a bounded number of GET requests against a single URL, releasing a
//! batch of requests once per tick while never exceeding a concurrency
//! ceiling, and summarises the outcome once every request has completed.
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use volley::{LoadTest, ReqwestClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let report = LoadTest::new("http://127.0.0.1:3000/", ReqwestClient::new(None)?)
//!     .requests(500)
//!     .rate(100)
//!     .concurrency(50)
//!     .interval(Duration::from_secs(1))
//!     .await?;
//!
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

mod aggregator;
mod client;
mod config;
mod constants;
mod error;
mod executor;
mod gate;
mod pacer;
mod report;
mod timer;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::{ResultAggregator, Tally};
pub use client::{HttpGet, ReqwestClient};
pub use config::RunConfig;
pub use constants::*;
pub use error::{ConfigError, RunError};
pub use executor::{Outcome, RequestExecutor};
pub use gate::{ConcurrencyGate, GatePermit};
pub use load_test::{run_load_test, LoadTest};
pub use pacer::{Pacer, RunState};
pub use report::RunReport;

pub use reqwest::{StatusCode, Url};
