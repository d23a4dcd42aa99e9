/// Error type raised by collaborators (registries, filesystem, authorizer).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type CollaboratorResult<T> = std::result::Result<T, BoxError>;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid module file URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("{collaborator} failed: {source}")]
    Collaborator {
        collaborator: &'static str,
        #[source]
        source: BoxError,
    },
}

impl ResolveError {
    /// Wrap a collaborator fault, keeping the name of the failing collaborator.
    pub fn collaborator(collaborator: &'static str) -> impl FnOnce(BoxError) -> Self {
        move |source| ResolveError::Collaborator {
            collaborator,
            source,
        }
    }
}

pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
