//! Option snapshots and the selection policy.
//!
//! Options are ephemeral: a snapshot is recomputed from live browser state
//! on every operation and has no identity beyond its position. The policy
//! functions here are pure so the selection behavior is testable without a
//! browser.

/// One selectable entry of a dropdown control at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
	/// Display text shown to the user.
	pub text: String,
	/// Underlying form value submitted with the option.
	pub value: String,
}

impl OptionEntry {
	pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			value: value.into(),
		}
	}
}

/// Outcome of a select-by-value-or-first request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
	/// The requested value was present and selected.
	Exact { value: String },
	/// The requested value was absent; the first option with a non-empty
	/// value was selected instead.
	Fallback { requested: String, value: String },
	/// The requested value was absent and every option value was empty,
	/// so nothing was selected.
	NoViableOption { requested: String },
}

impl Selection {
	/// Returns the value that was actually selected, if any.
	pub fn selected_value(&self) -> Option<&str> {
		match self {
			Selection::Exact { value } | Selection::Fallback { value, .. } => Some(value),
			Selection::NoViableOption { .. } => None,
		}
	}

	pub fn is_fallback(&self) -> bool {
		matches!(self, Selection::Fallback { .. })
	}
}

/// Display texts of `options` that are not empty or whitespace-only, in
/// document order.
pub fn visible_texts(options: &[OptionEntry]) -> Vec<String> {
	options
		.iter()
		.filter(|option| !option.text.trim().is_empty())
		.map(|option| option.text.clone())
		.collect()
}

/// Underlying values of `options` that are not empty or whitespace-only, in
/// document order.
pub fn non_empty_values(options: &[OptionEntry]) -> Vec<String> {
	options
		.iter()
		.filter(|option| !option.value.trim().is_empty())
		.map(|option| option.value.clone())
		.collect()
}

/// Decides what to select for `target` against an option snapshot.
///
/// An exact value match wins. Otherwise the first option with a non-empty
/// value is chosen, skipping the placeholder. When no option has a
/// non-empty value there is nothing viable to select.
pub fn plan_selection(options: &[OptionEntry], target: &str) -> Selection {
	if options.iter().any(|option| option.value == target) {
		return Selection::Exact {
			value: target.to_string(),
		};
	}

	match options.iter().find(|option| !option.value.trim().is_empty()) {
		Some(option) => Selection::Fallback {
			requested: target.to_string(),
			value: option.value.clone(),
		},
		None => Selection::NoViableOption {
			requested: target.to_string(),
		},
	}
}
