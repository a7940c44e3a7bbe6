pub mod race_json;
pub mod training_json;

pub use race_json::{
    reward_for_position_json, score_race_json, simulate_segment_race_json,
    verify_segment_race_json,
};
pub use training_json::{check_eligibility_json, compute_gains_json, decay_condition_json};

use crate::error::{EngineError, Result};
use crate::SCHEMA_VERSION;

/// Reject requests from a different schema generation up front.
pub(crate) fn ensure_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        tracing::warn!(found, expected = SCHEMA_VERSION, "rejected request schema version");
        return Err(EngineError::UnsupportedSchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}
