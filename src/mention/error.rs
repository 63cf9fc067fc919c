//! Error types for mention client construction.

use thiserror::Error;

/// Error type for mention client construction.
///
/// Discovery and delivery never fail with an error: endpoint-not-found
/// and transport failures are normal, countable outcomes. The only hard
/// failure is a source document that nothing useful can be done with.
#[derive(Debug, Error)]
pub enum MentionError {
    /// The source document URL could not be parsed.
    #[error("Invalid source URL '{url}': {source}")]
    InvalidSourceUrl {
        /// The invalid URL string
        url: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },
}
