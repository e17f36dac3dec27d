//! Deployment status presentation

/// Glyph used for any status not in the table
pub const DEFAULT_GLYPH: &str = "ℹ️";

/// Map a deployment status to its display glyph. Matching ignores ASCII case.
pub fn status_glyph(status: &str) -> &'static str {
    match status.trim().to_ascii_uppercase().as_str() {
        "SUCCESS" => "✅",
        "FAILED" => "❌",
        "CRASHED" => "💥",
        "BUILDING" => "🔨",
        "DEPLOYING" => "🚀",
        "INITIALIZING" => "⚙️",
        "QUEUED" => "⏳",
        "WAITING" => "⏸️",
        "SLEEPING" => "😴",
        "SKIPPED" => "⏭️",
        "REMOVING" => "🧹",
        "REMOVED" => "🗑️",
        _ => DEFAULT_GLYPH,
    }
}
