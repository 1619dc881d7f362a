use thiserror::Error;

/// Failure taxonomy for the tool layer.
///
/// Upstream provider failures never appear here: they are reported inside a
/// [`crate::ToolOutcome`] envelope with `success: false`. These variants are
/// the ones the dispatch endpoint maps to HTTP status codes.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] serde_json::Error),
}

impl ToolError {
    /// Whether the failure is the caller's fault (HTTP 400) rather than an
    /// unexpected server-side one (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::MissingParameter(_))
    }
}
