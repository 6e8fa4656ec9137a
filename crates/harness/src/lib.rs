//! Session lifecycle and configuration for the MyRent E2E suite.
//!
//! Each worker of the scenario pool owns exactly one browser session at a
//! time. [`with_session`] scopes acquisition and release around a scenario
//! so a recycled worker can never observe a stale handle, and
//! [`SessionRegistry`] enforces the one-session-per-worker invariant.

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod session;
pub mod types;

pub use config::SuiteConfig;
pub use error::{HarnessError, Result};
pub use logging::init_logging;
pub use registry::SessionRegistry;
pub use session::{BoxFut, Session, endpoint_reachable, with_session};
pub use types::BrowserKind;
