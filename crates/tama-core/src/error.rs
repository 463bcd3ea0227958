use thiserror::Error;

pub type PetResult<T> = Result<T, PetError>;

/// Everything the pet model and its save file can fail with.
///
/// None of these are fatal: front-ends recover from each one locally.
#[derive(Debug, Error)]
pub enum PetError {
    /// The save file exists but could not be parsed or failed validation.
    #[error("corrupt save data: {0}")]
    CorruptSaveData(String),
    #[error("unrecognized command: {0:?}")]
    InvalidAction(String),
    #[error("the pet is dead and cannot do that")]
    ActionOnDeadPet,
    #[error("save file i/o failed: {0}")]
    Io(#[from] std::io::Error),
}
