/// Convenience result type used across stackgraph.
pub type GraphResult<T> = Result<T, GraphError>;

/// Top-level error taxonomy used by graph APIs.
///
/// [`GraphError::Cancelled`] is an outcome, not a fault: check [`GraphError::is_cancelled`] before
/// reporting an error to users.
#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tile grid with an empty axis.
    #[error("invalid tile count: {width}x{height}x{depth} (every axis must be >= 1)")]
    InvalidTileCount {
        /// Columns.
        width: usize,
        /// Rows.
        height: usize,
        /// Slices.
        depth: usize,
    },

    /// A target resolution too small to give every tile at least one voxel.
    #[error(
        "resolution too small: {width}x{height}x{depth} cannot hold {count_width}x{count_height}x{count_depth} tiles"
    )]
    ResolutionTooSmall {
        /// Target width in pixels.
        width: u32,
        /// Target height in pixels.
        height: u32,
        /// Target depth in voxels.
        depth: u32,
        /// Columns requested.
        count_width: usize,
        /// Rows requested.
        count_height: usize,
        /// Slices requested.
        count_depth: usize,
    },

    /// Failures while producing or compositing buffers.
    #[error("render error: {0}")]
    Render(String),

    /// The render was cancelled cooperatively.
    #[error("render cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GraphError {
    /// Build a [`GraphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GraphError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// `true` for [`GraphError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
