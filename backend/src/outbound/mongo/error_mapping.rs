//! Shared driver error mapping for the document-store repositories.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use tracing::error;

/// Server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Map a driver error into a repository-specific query/connection error.
///
/// Network, pool and server-selection failures are connection errors;
/// everything else is a query error.
pub(super) fn map_mongo_error<E, Q, C>(
    collection: &'static str,
    err: MongoError,
    query: Q,
    connection: C,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    error!(collection, error = %err, "document store operation failed");
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => connection(format!("{collection}: {err}")),
        _ => query(format!("{collection}: {err}")),
    }
}

/// Whether the error is a unique index violation.
pub(super) fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        &*err.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
