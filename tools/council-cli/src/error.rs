use std::path::PathBuf;
use std::process::ExitCode;

/// All errors produced by the council CLI.
///
/// Variants are split into two categories:
/// - **Configuration errors** (exit code 2): unreadable or invalid site config, I/O failures
/// - **Operational errors** (exit code 1): requests the user can correct
#[derive(thiserror::Error, Debug)]
pub enum CouncilError {
    // ── Configuration errors (exit code 2) ───────────────────────────

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid offline settings: {0}")]
    InvalidOffline(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Operational errors (exit code 1) ─────────────────────────────

    #[error("No catalog entry with id: {id}")]
    UnknownEntry { id: String },

    #[error("Unknown theme: {name} (expected auto, light or dark)")]
    UnknownTheme { name: String },
}

impl CouncilError {
    /// Map each error variant to its process exit code.
    ///
    /// - `2`: configuration or I/O problem
    /// - `1`: operational failure
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code_num())
    }

    /// The raw numeric exit code.
    pub fn exit_code_num(&self) -> u8 {
        match self {
            Self::ConfigNotFound { .. }
            | Self::ConfigParse(_)
            | Self::InvalidCatalog(_)
            | Self::InvalidOffline(_)
            | Self::Io(_)
            | Self::Json(_) => 2,

            Self::UnknownEntry { .. } | Self::UnknownTheme { .. } => 1,
        }
    }
}
