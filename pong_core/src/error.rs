use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid action: {0} (expected 0 = none, 1 = up, 2 = down)")]
    InvalidAction(u8),

    #[error("Invalid player kind: {0:?} (expected ai, bot or human)")]
    InvalidPlayerKind(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Missing component: {0}")]
    MissingComponent(#[from] hecs::ComponentError),
}

impl CoreError {
    /// Whether the caller violated a precondition of the call (as opposed to
    /// the world being in a broken state).
    pub fn is_contract_violation(&self) -> bool {
        match self {
            CoreError::InvalidAction(_) => true,
            CoreError::InvalidPlayerKind(_) => true,
            CoreError::InvalidConfig(_) => true,
            CoreError::InvalidPlacement(_) => true,
            CoreError::MissingComponent(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
