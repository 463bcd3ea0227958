pub mod clock;
pub mod config;
pub mod error;
pub mod pet;
pub mod storage;

pub use error::{PetError, PetResult};
pub use pet::{Action, Command, Mood, Pet, PetSnapshot, Vital};
pub use storage::{RestorePolicy, SaveFile};
