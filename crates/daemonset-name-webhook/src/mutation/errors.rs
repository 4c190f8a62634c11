use thiserror::Error;

use crate::admission_review::GroupVersionResource;

pub type Result<T> = std::result::Result<T, MutationError>;

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("error decoding request: {0}")]
    DecodeReview(serde_json::Error),

    #[error("error decoding request: admission review has no request")]
    MissingRequest,

    #[error("unexpected resource type: {0}")]
    UnexpectedResource(GroupVersionResource),

    #[error("error unmarshaling pod: {0}")]
    DecodePod(serde_json::Error),

    #[error("error unmarshaling pod: admission request has no object")]
    MissingObject,

    #[error("GenerateName is empty")]
    GenerateNameEmpty,

    #[error("node not assigned")]
    NodeNotAssigned,

    #[error("invalid pod name: {}", .0.join("; "))]
    InvalidPodName(Vec<String>),

    #[error("could not marshal patch: {0}")]
    PatchSerialization(serde_json::Error),
}

impl MutationError {
    /// Failures caused by the content of a well formed request, as opposed
    /// to unreadable input or a fault of the webhook itself.
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            MutationError::UnexpectedResource(_)
                | MutationError::GenerateNameEmpty
                | MutationError::NodeNotAssigned
                | MutationError::InvalidPodName(_)
        )
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, MutationError::PatchSerialization(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pod_name_lists_every_violation() {
        let error = MutationError::InvalidPodName(vec![
            String::from("must be no more than 253 characters"),
            String::from("a lowercase RFC 1123 subdomain must consist of..."),
        ]);

        assert_eq!(
            error.to_string(),
            "invalid pod name: must be no more than 253 characters; a lowercase RFC 1123 subdomain must consist of..."
        );
        assert!(error.is_denial());
        assert!(!error.is_internal());
    }

    #[test]
    fn decode_failures_are_not_denials() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = MutationError::DecodeReview(json_error);

        assert!(error.to_string().starts_with("error decoding request: "));
        assert!(!error.is_denial());
        assert!(!MutationError::MissingObject.is_denial());
    }
}
