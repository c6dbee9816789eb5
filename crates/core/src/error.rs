use crate::types::DbId;

/// Domain failures raised before anything reaches storage.
///
/// `Display` is the exact sentence shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Input broke a validation rule.
    #[error("{0}")]
    Validation(String),

    /// A lookup by id matched no row.
    #[error("{entity} #{id} not found.")]
    NotFound { entity: &'static str, id: DbId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_have_no_prefix() {
        let err = CoreError::Validation("Title is required.".into());
        assert_eq!(err.to_string(), "Title is required.");

        let err = CoreError::NotFound {
            entity: "Ticket",
            id: 4,
        };
        assert_eq!(err.to_string(), "Ticket #4 not found.");
    }
}
