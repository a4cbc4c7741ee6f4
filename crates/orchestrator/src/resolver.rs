//! Rule resolution.

use database::AutomationRule;
use tracing::debug;

use crate::error::EngineError;
use crate::store::ConfigStore;

/// Find the rule that governs a trigger.
///
/// Returns `None` when no enabled rule exists or the rule has AI turned
/// off. Never writes.
pub async fn resolve_rule(
    store: &dyn ConfigStore,
    org_id: &str,
    trigger_type: &str,
) -> Result<Option<AutomationRule>, EngineError> {
    let Some(rule) = store.find_active_rule(org_id, trigger_type).await? else {
        debug!(org_id, trigger_type, "No enabled automation rule");
        return Ok(None);
    };

    if !rule.ai_enabled {
        debug!(org_id, trigger_type, rule_id = rule.id, "Rule has AI disabled");
        return Ok(None);
    }

    Ok(Some(rule))
}
