//! Shared string constants for the layout crate.

// ── Documents ───────────────────────────────────────────────────

/// Prefix applied to every persisted report id.
pub const REPORT_ID_PREFIX: &str = "report-";

/// Name used for exports when the user has not typed one.
pub const UNTITLED_REPORT_NAME: &str = "Untitled Report";

/// Suffix appended to a duplicated report's name.
pub const COPY_SUFFIX: &str = " (Copy)";

/// File extension for exported report documents.
pub const EXPORT_EXTENSION: &str = "json";
