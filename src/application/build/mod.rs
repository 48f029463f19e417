//! Build Module
//!
//! Turns a deployment's desired-state document into staged artifacts.
//!
//! ## Structure
//!
//! - `options` - Per-call parameters (`BuildRequest`)
//! - `result` - Result types (`BuildReport`)
//! - `context` - Per-build state (`BuildContext`)
//! - `use_case` - Step sequencing (`DeploymentOrchestrator`)
//!
//! ## Usage
//!
//! ```ignore
//! use nagstage::application::build::{BuildRequest, DeploymentOrchestrator};
//!
//! let mut orchestrator = DeploymentOrchestrator::new(fs, layout, live, revisions, factory);
//! let report = orchestrator.build(&BuildRequest::new("prod"))?;
//! ```

mod context;
mod options;
mod result;
mod use_case;

pub use context::BuildContext;
pub use options::BuildRequest;
pub use result::BuildReport;
pub use use_case::DeploymentOrchestrator;
