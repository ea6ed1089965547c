//! Human-readable error descriptions and structured JSON error formatting.

use crate::store::StoreError;
use growplan_core::PlanError;

fn plan_error_reason(e: &PlanError) -> &'static str {
    match e {
        PlanError::UnknownProgram(_) => "UnknownProgram",
        PlanError::UnknownPhase { .. } => "UnknownPhase",
        PlanError::EmptyCatalog => "EmptyCatalog",
        PlanError::TooManyEntries { .. } => "TooManyEntries",
        PlanError::TzOffsetOutOfRange(_) => "TzOffsetOutOfRange",
        PlanError::InvalidEntry { .. } => "InvalidEntry",
    }
}

fn find<E: std::error::Error + 'static>(err: &eyre::Report) -> Option<&E> {
    err.chain().find_map(|e| e.downcast_ref::<E>())
}

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(pe) = find::<PlanError>(err) {
        return match pe {
            PlanError::UnknownProgram(id) => format!(
                "What happened: No growth program matches {id:?}.\nLikely causes: Typo in --program, or a --plant/--fertilizer pair missing from the active catalog.\nHow to fix: Run `growplan catalog list` to see the available ids."
            ),
            PlanError::UnknownPhase { program, phase } => format!(
                "What happened: Program {program} has no phase {phase:?}.\nLikely causes: Misspelled --phase or an imported program with custom phases.\nHow to fix: Use one of seedling, vegetative, flowering, fruiting, or omit --phase."
            ),
            PlanError::EmptyCatalog => "What happened: The catalog has no programs.\nLikely causes: The --catalog file normalized to an empty list.\nHow to fix: Export a fresh catalog with `growplan catalog export FILE` and edit that.".to_string(),
            PlanError::TooManyEntries { count, max } => format!(
                "What happened: The schedule would hold {count} entries; the device stores {max}.\nLikely causes: Too many channels for the device's schedule slots.\nHow to fix: Turn off pH regulation (--no-ph) or plan fewer channels."
            ),
            PlanError::TzOffsetOutOfRange(tz) => format!(
                "What happened: Timezone offset {tz} min is outside -720..=840.\nLikely causes: Offset given in hours or seconds instead of minutes.\nHow to fix: Pass --tz-offset in minutes (e.g. 180 for UTC+3)."
            ),
            PlanError::InvalidEntry { index, reason } => format!(
                "What happened: Schedule entry {index} was rejected ({reason}).\nLikely causes: A hand-edited schedule file or a too small name budget.\nHow to fix: Check schedule.name_max_bytes in the config and re-run plan."
            ),
        };
    }

    if let Some(se) = find::<StoreError>(err) {
        return match se {
            StoreError::Parse { path, .. } => format!(
                "What happened: {} is not a schedule document.\nLikely causes: The file was written by another tool or edited by hand.\nHow to fix: Move the file away or pass a different --save path.",
                path.display()
            ),
            StoreError::Encode { path, source } => format!(
                "What happened: The schedule for {} could not be encoded ({source}).\nLikely causes: An entry holds a value JSON cannot represent.\nHow to fix: Re-run plan; nothing was written.",
                path.display()
            ),
            StoreError::Read { path, source } | StoreError::Write { path, source } => format!(
                "What happened: Could not access {} ({source}).\nLikely causes: Missing directory or insufficient permissions.\nHow to fix: Check the --save path.",
                path.display()
            ),
        };
    }

    // String-based heuristics for errors coming from config or catalog loading
    let msg = err.to_string();
    let full = format!("{err:#}");
    let lower = full.to_ascii_lowercase();

    if lower.contains("unsupported growth programs format")
        || lower.contains("catalog is not valid json")
        || lower.contains("catalog contains no programs")
        || lower.contains("schema version")
    {
        return format!(
            "What happened: The catalog file could not be imported ({full}).\nLikely causes: Not a peristaltic.growth-programs export, or an empty program list.\nHow to fix: Start from `growplan catalog export FILE` output."
        );
    }

    if lower.contains("open catalog") {
        return format!(
            "What happened: The catalog file could not be opened ({full}).\nHow to fix: Check the --catalog path."
        );
    }

    if lower.contains("schedule.") || lower.contains("logging.") || lower.contains("config") {
        return format!(
            "What happened: Invalid configuration ({full}).\nLikely causes: Missing or out-of-range values in the TOML.\nHow to fix: Edit the config file, then rerun."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: 3 for selection errors, 4 for a rejected schedule
/// document, 5 for schedule file I/O, 1 otherwise.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(pe) = find::<PlanError>(err) {
        return match pe {
            PlanError::UnknownProgram(_) | PlanError::UnknownPhase { .. } | PlanError::EmptyCatalog => 3,
            PlanError::TooManyEntries { .. }
            | PlanError::TzOffsetOutOfRange(_)
            | PlanError::InvalidEntry { .. } => 4,
        };
    }
    if find::<StoreError>(err).is_some() {
        return 5;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(pe) = find::<PlanError>(err) {
        return json!({
            "reason": plan_error_reason(pe),
            "detail": pe.to_string(),
            "message": humanize(err),
        })
        .to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": humanize(err) }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::WrapErr;

    #[test]
    fn typed_errors_survive_wrapping() {
        let err: eyre::Report = Err::<(), _>(PlanError::TooManyEntries { count: 9, max: 8 })
            .wrap_err("save schedule")
            .unwrap_err();
        assert_eq!(exit_code_for_error(&err), 4);
        assert!(humanize(&err).contains("device stores 8"));
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "TooManyEntries");
    }

    #[test]
    fn selection_errors_exit_3() {
        let err = eyre::Report::new(PlanError::UnknownProgram("x".into()));
        assert_eq!(exit_code_for_error(&err), 3);
        assert!(humanize(&err).contains("catalog list"));
    }

    #[test]
    fn encode_failure_is_not_reported_as_a_bad_file() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = eyre::Report::new(StoreError::Encode {
            path: "sched.json".into(),
            source,
        });
        let text = humanize(&err);
        assert!(text.contains("could not be encoded"));
        assert!(!text.contains("is not a schedule document"));
        assert_eq!(exit_code_for_error(&err), 5);
    }

    #[test]
    fn config_messages_are_recognized() {
        let err = eyre::eyre!("schedule.pause_minutes must be in [1, 180]");
        assert!(humanize(&err).starts_with("What happened: Invalid configuration"));
        assert_eq!(exit_code_for_error(&err), 1);
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&err)).unwrap();
        assert_eq!(v["reason"], "Error");
    }
}
