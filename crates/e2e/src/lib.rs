//! End-to-end suite for the MyRent web application.
//!
//! Page objects wrap the login flow, scenarios express the checks, and the
//! runner executes them across a bounded pool of workers, one browser
//! session per worker per scenario.

pub mod error;
pub mod pages;
pub mod runner;
pub mod scenario;

pub use error::{E2eError, Result};
pub use runner::{RunnerOptions, ScenarioOutcome, ScenarioRunner, SuiteReport};
pub use scenario::Scenario;
