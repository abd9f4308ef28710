use crate::{CliError, OutputMode};
use acctthrive_core::canonical;
use serde_json::Value;

/// Canonical single-line JSON with `--json`, pretty JSON otherwise.
pub(crate) fn emit_ok(output_mode: OutputMode, payload: &Value) -> Result<(), CliError> {
    if output_mode.json {
        let bytes =
            canonical::stable_json_bytes(payload).map_err(|e| CliError::internal(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| CliError::internal(e.to_string()))?;
        println!("{text}");
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(payload).map_err(|e| CliError::internal(e.to_string()))?
        );
    }
    Ok(())
}
