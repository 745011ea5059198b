//! Domain errors returned by the autorole store and template catalog.

use crate::database::StorageError;
use crate::features::autorole::RoleCategory;

#[derive(Debug, thiserror::Error)]
pub enum AutoroleError {
    /// The category already holds its maximum number of roles.
    #[error("Maximum limit of {max} roles for {category} has been reached.")]
    LimitExceeded { category: RoleCategory, max: usize },

    #[error("Template name must not be empty.")]
    EmptyTemplateName,

    /// The change could not be written durably and was not applied.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AutoroleError {
    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self, AutoroleError::LimitExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_message_names_category_and_max() {
        let err = AutoroleError::LimitExceeded {
            category: RoleCategory::Human,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "Maximum limit of 5 roles for humans has been reached."
        );
        assert!(err.is_limit_exceeded());

        let err = AutoroleError::LimitExceeded {
            category: RoleCategory::Automated,
            max: 2,
        };
        assert_eq!(
            err.to_string(),
            "Maximum limit of 2 roles for bots has been reached."
        );
    }

    #[test]
    fn test_empty_name_is_not_a_limit_error() {
        assert!(!AutoroleError::EmptyTemplateName.is_limit_exceeded());
    }
}
