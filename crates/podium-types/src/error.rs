/// Errors produced when parsing Podium wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("unrecognized kind code: {0:?}")]
    InvalidKind(String),

    #[error("invalid entry id: {0:?}")]
    InvalidId(String),
}
