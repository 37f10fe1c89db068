//! Read-only client library for the GoCD continuous-delivery server API.
//!
//! The crate discovers pipeline names, resolves a run's upstream dependency
//! chain from the server's value-stream map, and classifies run outcomes from
//! per-stage results. It never mutates server state, caches nothing across
//! calls, and issues exactly one request per operation.
//!
//! ```no_run
//! use gocd_client::{GoCDClient, GoCDConfig};
//!
//! # async fn example() -> gocd_client::Result<()> {
//! let client = GoCDClient::new(GoCDConfig::with_credentials(
//!     "https://go.example.com",
//!     "ci-reader",
//!     "secret",
//! ))?;
//!
//! for name in client.list_pipelines(Some("build-")).await? {
//!     let deps = client.upstream_dependencies(&name, 1).await?;
//!     println!("{name}: {} upstream dependencies", deps.len() - 1);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod index;
mod types;

pub mod history;
pub mod vsm;

pub use client::GoCDClient;
pub use config::GoCDConfig;
pub use error::{GoCDError, Result};
pub use types::{PipelineDependency, PipelineRunStatus, PipelineStatus};
