//! # COESI Docker Module Interface
//!
//! File: cli/src/common/docker/mod.rs
//!
//! ## Overview
//!
//! Everything that talks to Docker lives here:
//!
//! - **`compose`**: The orchestration facade. `OrchestrationCommand` describes
//!   one `docker-compose` call, `Orchestrator` is the trait handlers depend on,
//!   and `ComposeCli` is the implementation that shells out.
//! - **`preflight`**: Capability probes run before any command that touches
//!   the deployment.
//!
//! ```rust
//! use crate::common::docker::{ComposeCli, OrchestrationCommand, Orchestrator};
//!
//! let orchestrator = ComposeCli::new(settings);
//! orchestrator.preflight().await?;
//! orchestrator.execute(&OrchestrationCommand::ps(Profile::Dev)).await?;
//! ```
//!

/// Docker Compose command model and the `Orchestrator` trait.
pub mod compose;
/// Engine, daemon and compose availability checks.
pub mod preflight;

pub use compose::{ComposeCli, OrchestrationCommand, Orchestrator};
