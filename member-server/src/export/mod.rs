//! Member export (会員データ取込用 CSV)
//!
//! Builds the fixed-layout CSV the downstream membership system imports,
//! encoded in Shift-JIS, and purges the exported rows from the store.
//!
//! - [`csv`] - artifact construction (header, row mapping, encoding)
//! - [`workflow`] - the confirmation-gated export-and-purge state machine

pub mod csv;
pub mod workflow;

pub use csv::EXPORT_FILENAME;
pub use workflow::{ExportArtifact, ExportDecision, ExportOutcome, run};

use crate::db::repository::RepoError;
use crate::utils::AppError;
use shared::phone::PhoneParseError;
use thiserror::Error;

/// Export failure - always terminal for the current request.
///
/// Construction failures happen before the purge, so a failed export
/// never deletes anything.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("phone number of member {member_no}: {source}")]
    Phone {
        member_no: String,
        #[source]
        source: PhoneParseError,
    },

    #[error("artifact contains characters not representable in Shift_JIS")]
    Encoding,

    #[error("csv serialization failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            // Bad stored data is reported to the operator, not a 500
            ExportError::Phone { .. } => AppError::business_rule(err.to_string()),
            ExportError::Encoding => AppError::internal(err.to_string()),
            ExportError::Csv(e) => AppError::internal(e.to_string()),
            ExportError::Io(e) => AppError::internal(format!("artifact write failed: {e}")),
            ExportError::Repo(e) => e.into(),
            ExportError::Database(e) => AppError::database(e.to_string()),
        }
    }
}
