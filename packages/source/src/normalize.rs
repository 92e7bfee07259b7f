//! Canonicalization of provider output.

use gun_violence_state_models::normalize_state_code;

use crate::IncidentDataset;

/// Rewrites every state identifier to its canonical postal code.
///
/// Records whose state cannot be identified are dropped with a warning;
/// `provider` is only used in the log message. Monthly records pass
/// through untouched.
#[must_use]
pub fn normalize_dataset(provider: &str, mut dataset: IncidentDataset) -> IncidentDataset {
    let before = dataset.states.len();

    dataset.states.retain_mut(|record| {
        let Some(code) = normalize_state_code(&record.state_code) else {
            log::warn!(
                "[{provider}] Dropping record with unknown state '{}'",
                record.state_code
            );
            return false;
        };
        if record.state_code != code {
            record.state_code = code.to_string();
        }
        true
    });

    let dropped = before - dataset.states.len();
    if dropped > 0 {
        log::info!("[{provider}] Dropped {dropped} unrecognized state record(s)");
    }

    dataset
}
