use surplus_solver::{CompositeError, MarketError};

/// Errors that can occur when drawing a market
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The market could not be analysed
    #[error(transparent)]
    Market(#[from] MarketError),
    /// A side could not be aggregated
    #[error(transparent)]
    Composite(#[from] CompositeError),
    /// The drawing backend failed
    #[error("failed to draw {what}: {message}")]
    Backend {
        /// What was being drawn
        what: &'static str,
        /// The backend's error
        message: String,
    },
}

impl RenderError {
    // For `map_err`: wraps whatever the backend reports
    pub(crate) fn backend<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> Self {
        move |error| Self::Backend {
            what,
            message: error.to_string(),
        }
    }
}
