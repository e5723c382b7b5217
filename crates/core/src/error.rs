use crate::types::EntityId;

/// Failure taxonomy shared by the authorization resolver and both workflow
/// engines.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The acting username (or id) does not resolve to a known employee.
    #[error("User {0} doesn't exist or the username (id) is incorrect")]
    UnknownActor(String),

    /// A tender, bid, or a specific version of one, does not exist.
    #[error("{entity} {id} not found (or exact {entity} version)")]
    NotFound { entity: &'static str, id: EntityId },

    /// The actor exists but is not allowed to act on the entity.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A concurrent write claimed the same version number first. Retryable.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed or contradictory input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A collaborator lookup or write failed for a reason other than "no rows".
    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),
}

/// Stable, transport-independent classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnknownActor,
    NotFound,
    Forbidden,
    Conflict,
    ValidationFailed,
    DependencyUnavailable,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnknownActor => "unknown_actor",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Conflict => "conflict",
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::DependencyUnavailable => "dependency_unavailable",
        }
    }
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::UnknownActor(_) => ErrorKind::UnknownActor,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Forbidden(_) => ErrorKind::Forbidden,
            CoreError::Conflict(_) => ErrorKind::Conflict,
            CoreError::Validation(_) => ErrorKind::ValidationFailed,
            CoreError::DependencyUnavailable(_) => ErrorKind::DependencyUnavailable,
        }
    }

    pub fn tender_not_found(id: EntityId) -> Self {
        CoreError::NotFound {
            entity: "Tender",
            id,
        }
    }

    pub fn bid_not_found(id: EntityId) -> Self {
        CoreError::NotFound { entity: "Bid", id }
    }

    pub fn not_enough_rights() -> Self {
        CoreError::Forbidden("not enough rights".into())
    }
}

/// Errors reported by the versioned store and identity directory.
///
/// "No rows" is never an error at this boundary; lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert collided with an existing `(id, version)` row.
    #[error("version {version} of {id} already exists")]
    Conflict { id: EntityId, version: i32 },

    /// The backing engine failed (connection, timeout, decoding, ...).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Map a collaborator failure into the domain taxonomy, logging the
    /// underlying cause under `context`.
    pub fn into_core(self, context: &str) -> CoreError {
        match self {
            StoreError::Conflict { id, version } => {
                tracing::warn!(%id, version, context, "Concurrent version insert rejected");
                CoreError::Conflict(format!(
                    "version {version} of {id} was written concurrently, retry the request"
                ))
            }
            StoreError::Unavailable(msg) => {
                tracing::error!(error = %msg, context, "Collaborator call failed");
                CoreError::DependencyUnavailable(context.to_string())
            }
        }
    }
}
