mod action;
mod mood;
mod snapshot;
mod state;
mod vitals;

pub use action::{Action, Command};
pub use mood::Mood;
pub use snapshot::PetSnapshot;
pub use state::Pet;
pub use vitals::{VITAL_MAX, VITAL_MIN, Vital, clamp_vital};
