//! AI-assisted CV pre-screening service for the recruiting platform.
//!
//! The crate is organized around workflow modules: `workflows::screening` holds the
//! CV screening core (prompt compilation, verdict parsing, policy engine, transaction
//! recording), while `config`, `telemetry`, `error`, and `oracle` carry the service
//! plumbing shared by the CLI and the HTTP surface.

pub mod config;
pub mod error;
pub mod oracle;
pub mod telemetry;
pub mod workflows;
