use async_trait::async_trait;

use crate::error::Result;
use crate::model::OptionEntry;

/// Live source of a control's option list.
///
/// Implementations resolve the control fresh on every call; no snapshot is
/// cached between polls. The seam exists so the population wait can be
/// exercised against fakes.
#[async_trait]
pub trait OptionSource: Send + Sync {
	/// Current option list of the control, in document order.
	async fn options(&self) -> Result<Vec<OptionEntry>>;
}
