//! Parallel scenario runner.
//!
//! A bounded pool of workers drains the scenario queue. Each worker runs
//! one scenario at a time on a session it owns exclusively, acquired and
//! released through the harness registry.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use myrent_harness::{SessionRegistry, SuiteConfig, with_session};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::E2eError;
use crate::scenario::Scenario;

#[derive(Debug, Clone)]
pub struct RunnerOptions {
	/// Number of concurrent workers, one browser session each.
	pub parallelism: usize,
	/// Run only scenarios whose name contains this substring.
	pub filter: Option<String>,
}

impl Default for RunnerOptions {
	fn default() -> Self {
		Self {
			parallelism: 2,
			filter: None,
		}
	}
}

/// Result of one scenario execution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
	pub name: String,
	pub passed: bool,
	pub duration_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// Aggregate result of a suite run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteReport {
	pub total: usize,
	pub passed: usize,
	pub failed: usize,
	pub duration_ms: u64,
	pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
	pub fn from_outcomes(outcomes: Vec<ScenarioOutcome>, duration: Duration) -> Self {
		let passed = outcomes.iter().filter(|outcome| outcome.passed).count();
		Self {
			total: outcomes.len(),
			passed,
			failed: outcomes.len() - passed,
			duration_ms: duration.as_millis() as u64,
			outcomes,
		}
	}

	pub fn all_passed(&self) -> bool {
		self.failed == 0
	}
}

pub struct ScenarioRunner {
	config: Arc<SuiteConfig>,
	registry: Arc<SessionRegistry>,
	options: RunnerOptions,
}

impl ScenarioRunner {
	pub fn new(config: SuiteConfig, options: RunnerOptions) -> Self {
		Self {
			config: Arc::new(config),
			registry: Arc::new(SessionRegistry::new()),
			options,
		}
	}

	pub fn registry(&self) -> &SessionRegistry {
		&self.registry
	}

	/// Runs the scenarios and returns the aggregate report.
	///
	/// Outcomes are reported in scenario order regardless of which worker
	/// executed them.
	pub async fn run(&self, scenarios: Vec<Scenario>) -> SuiteReport {
		let scenarios = filter_scenarios(scenarios, self.options.filter.as_deref());
		let started = Instant::now();

		let workers = self.options.parallelism.max(1).min(scenarios.len().max(1));
		let queue: Arc<Mutex<VecDeque<(usize, Scenario)>>> =
			Arc::new(Mutex::new(scenarios.into_iter().enumerate().collect()));

		let mut pool = JoinSet::new();
		for index in 0..workers {
			let queue = Arc::clone(&queue);
			let config = Arc::clone(&self.config);
			let registry = Arc::clone(&self.registry);
			let worker = format!("w{index}");

			pool.spawn(async move {
				let mut outcomes = Vec::new();
				loop {
					let next = queue.lock().await.pop_front();
					let Some((position, scenario)) = next else {
						break;
					};
					let outcome = run_one(&config, &registry, &worker, &scenario).await;
					outcomes.push((position, outcome));
				}
				outcomes
			});
		}

		let mut indexed = Vec::new();
		while let Some(joined) = pool.join_next().await {
			match joined {
				Ok(batch) => indexed.extend(batch),
				Err(err) => error!(target: "myrent.runner", error = %err, "worker task failed"),
			}
		}
		indexed.sort_by_key(|(position, _)| *position);

		SuiteReport::from_outcomes(
			indexed.into_iter().map(|(_, outcome)| outcome).collect(),
			started.elapsed(),
		)
	}
}

async fn run_one(
	config: &Arc<SuiteConfig>,
	registry: &SessionRegistry,
	worker: &str,
	scenario: &Scenario,
) -> ScenarioOutcome {
	info!(
		target: "myrent.runner",
		worker,
		scenario = scenario.name,
		"scenario start"
	);
	let started = Instant::now();

	// The closure moves owned handles so the boxed future borrows nothing
	// but the session.
	let scenario_task = scenario.clone();
	let config_task = Arc::clone(config);
	let result: Result<(), E2eError> = with_session(config.as_ref(), registry, worker, move |session| {
		Box::pin(async move { scenario_task.run(session, &config_task).await })
	})
	.await;

	let duration_ms = started.elapsed().as_millis() as u64;
	match result {
		Ok(()) => {
			info!(
				target: "myrent.runner",
				worker,
				scenario = scenario.name,
				duration_ms,
				"scenario passed"
			);
			ScenarioOutcome {
				name: scenario.name.to_string(),
				passed: true,
				duration_ms,
				error: None,
			}
		}
		Err(err) => {
			error!(
				target: "myrent.runner",
				worker,
				scenario = scenario.name,
				duration_ms,
				error = %err,
				"scenario failed"
			);
			ScenarioOutcome {
				name: scenario.name.to_string(),
				passed: false,
				duration_ms,
				error: Some(err.to_string()),
			}
		}
	}
}

fn filter_scenarios(scenarios: Vec<Scenario>, filter: Option<&str>) -> Vec<Scenario> {
	match filter {
		Some(needle) => scenarios
			.into_iter()
			.filter(|scenario| scenario.name.contains(needle))
			.collect(),
		None => scenarios,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scenario;

	fn outcome(name: &str, passed: bool) -> ScenarioOutcome {
		ScenarioOutcome {
			name: name.to_string(),
			passed,
			duration_ms: 10,
			error: (!passed).then(|| "check failed: boom".to_string()),
		}
	}

	#[test]
	fn report_accounts_passed_and_failed() {
		let report = SuiteReport::from_outcomes(
			vec![outcome("a", true), outcome("b", false), outcome("c", true)],
			Duration::from_millis(1500),
		);

		assert_eq!(report.total, 3);
		assert_eq!(report.passed, 2);
		assert_eq!(report.failed, 1);
		assert_eq!(report.duration_ms, 1500);
		assert!(!report.all_passed());
	}

	#[test]
	fn empty_report_counts_as_passed() {
		let report = SuiteReport::from_outcomes(Vec::new(), Duration::ZERO);
		assert!(report.all_passed());
		assert_eq!(report.total, 0);
	}

	#[test]
	fn report_serializes_camel_case_and_skips_absent_errors() {
		let report = SuiteReport::from_outcomes(
			vec![outcome("a", true), outcome("b", false)],
			Duration::from_millis(20),
		);
		let json = serde_json::to_string(&report).unwrap();

		assert!(json.contains("\"durationMs\":20"));
		assert!(json.contains("check failed: boom"));
		assert!(!json.contains("\"error\":null"));
	}

	#[test]
	fn filter_selects_by_substring() {
		let names: Vec<_> = filter_scenarios(scenario::all(), Some("company"))
			.iter()
			.map(|s| s.name)
			.collect();
		assert_eq!(names, vec!["company_options_listed", "company_select_fallback"]);
	}

	#[test]
	fn no_filter_keeps_everything() {
		assert_eq!(filter_scenarios(scenario::all(), None).len(), scenario::all().len());
	}
}
