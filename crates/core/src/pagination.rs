//! Limit/offset pagination for list operations.

use crate::error::CoreError;

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 5;

/// Offset used when the caller does not supply one.
pub const DEFAULT_OFFSET: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    /// Build pagination from optional caller input, applying defaults and
    /// rejecting negative values.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, CoreError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let offset = offset.unwrap_or(DEFAULT_OFFSET);
        if limit < 0 {
            return Err(CoreError::Validation(format!(
                "limit must not be negative, got {limit}"
            )));
        }
        if offset < 0 {
            return Err(CoreError::Validation(format!(
                "offset must not be negative, got {offset}"
            )));
        }
        Ok(Self { limit, offset })
    }

    /// Apply this page to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .collect()
    }
}
