use tracing::{debug, info};

use crate::error::{PetError, PetResult};

use super::{Action, Mood, PetSnapshot, VITAL_MAX, Vital, clamp_vital};

/// Decay per elapsed second at relaxed pacing.
pub const DEFAULT_DECAY_COEFFICIENT: f64 = 0.01;

const ENERGY_DECAY_FACTOR: f64 = 0.7;
const HAPPINESS_DECAY_FACTOR: f64 = 0.3;

/// The pet and everything that happens to it.
///
/// Once `alive` flips to false the pet is frozen: deltas, ticks and actions
/// no longer change anything.
#[derive(Debug, Clone)]
pub struct Pet {
    name: String,
    hunger: f64,
    happiness: f64,
    energy: f64,
    age_seconds: f64,
    alive: bool,
    last_update: f64,
    current_action: Option<Action>,
    decay_coefficient: f64,
}

impl Pet {
    pub fn new(name: impl Into<String>, now: f64) -> Self {
        Self {
            name: name.into(),
            hunger: VITAL_MAX,
            happiness: VITAL_MAX,
            energy: VITAL_MAX,
            age_seconds: 0.0,
            alive: true,
            last_update: now,
            current_action: None,
            decay_coefficient: DEFAULT_DECAY_COEFFICIENT,
        }
    }

    pub fn with_decay_coefficient(mut self, coefficient: f64) -> Self {
        self.decay_coefficient = coefficient;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    pub fn happiness(&self) -> f64 {
        self.happiness
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn age_seconds(&self) -> f64 {
        self.age_seconds
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn last_update(&self) -> f64 {
        self.last_update
    }

    /// Last action applied, `None` while idle.
    pub fn current_action(&self) -> Option<Action> {
        self.current_action
    }

    pub fn decay_coefficient(&self) -> f64 {
        self.decay_coefficient
    }

    pub fn vital(&self, vital: Vital) -> f64 {
        match vital {
            Vital::Hunger => self.hunger,
            Vital::Happiness => self.happiness,
            Vital::Energy => self.energy,
        }
    }

    fn vital_mut(&mut self, vital: Vital) -> &mut f64 {
        match vital {
            Vital::Hunger => &mut self.hunger,
            Vital::Happiness => &mut self.happiness,
            Vital::Energy => &mut self.energy,
        }
    }

    /// Adds `amount` to a vital, clamped to range, then re-checks death.
    /// Does nothing once the pet is dead.
    pub fn apply_delta(&mut self, vital: Vital, amount: f64) {
        if !self.alive {
            return;
        }
        let slot = self.vital_mut(vital);
        *slot = clamp_vital(*slot + amount);
        self.check_status();
    }

    fn check_status(&mut self) {
        if self.alive && (self.hunger <= 0.0 || self.energy <= 0.0) {
            self.alive = false;
            info!(
                name = %self.name,
                hunger = self.hunger,
                energy = self.energy,
                "pet died"
            );
        }
    }

    /// Applies decay for the time elapsed since the previous tick.
    ///
    /// A clock that steps backwards counts as zero elapsed time.
    pub fn tick(&mut self, now: f64) {
        if !self.alive {
            return;
        }
        let dt = (now - self.last_update).max(0.0);
        self.last_update = now;

        let decay = dt * self.decay_coefficient;
        self.apply_delta(Vital::Hunger, -decay);
        self.apply_delta(Vital::Energy, -decay * ENERGY_DECAY_FACTOR);
        self.apply_delta(Vital::Happiness, -decay * HAPPINESS_DECAY_FACTOR);

        self.age_seconds += dt;
        debug!(dt, decay, age = self.age_seconds, "tick");
    }

    pub fn mood_score(&self) -> f64 {
        self.happiness + self.energy - self.hunger
    }

    pub fn mood(&self) -> Mood {
        if !self.alive {
            return Mood::Dead;
        }
        Mood::from_score(self.mood_score())
    }

    /// Applies an action's effect bundle and remembers it for display.
    pub fn perform_action(&mut self, action: Action) -> PetResult<()> {
        if !self.alive {
            return Err(PetError::ActionOnDeadPet);
        }
        for &(vital, amount) in action.effects() {
            self.apply_delta(vital, amount);
        }
        self.current_action = Some(action);
        debug!(%action, alive = self.alive, "action applied");
        Ok(())
    }

    /// Returns the pet to idle. Dead pets keep their last action.
    pub fn reset_action(&mut self) {
        if self.alive {
            self.current_action = None;
        }
    }

    /// Restarts the decay clock, so time spent away is not counted.
    pub fn refresh_clock(&mut self, now: f64) {
        self.last_update = now;
    }

    pub fn to_snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            name: self.name.clone(),
            hunger: self.hunger,
            happiness: self.happiness,
            energy: self.energy,
            age_seconds: self.age_seconds,
            alive: self.alive,
            last_update: self.last_update,
        }
    }

    /// Rebuilds a pet from a saved record, keeping its stored timestamp.
    ///
    /// Out-of-range vitals are clamped and a pet whose hunger or energy is
    /// exhausted comes back dead regardless of the stored flag.
    pub fn from_snapshot(snapshot: PetSnapshot) -> PetResult<Self> {
        validate(&snapshot)?;
        let mut pet = Self {
            name: snapshot.name,
            hunger: clamp_vital(snapshot.hunger),
            happiness: clamp_vital(snapshot.happiness),
            energy: clamp_vital(snapshot.energy),
            age_seconds: snapshot.age_seconds,
            alive: snapshot.alive,
            last_update: snapshot.last_update,
            current_action: None,
            decay_coefficient: DEFAULT_DECAY_COEFFICIENT,
        };
        pet.check_status();
        Ok(pet)
    }
}

fn validate(snapshot: &PetSnapshot) -> PetResult<()> {
    if snapshot.name.trim().is_empty() {
        return Err(PetError::CorruptSaveData("pet has no name".into()));
    }
    let numbers = [
        ("hunger", snapshot.hunger),
        ("happiness", snapshot.happiness),
        ("energy", snapshot.energy),
        ("age_seconds", snapshot.age_seconds),
        ("last_update", snapshot.last_update),
    ];
    for (field, value) in numbers {
        if !value.is_finite() {
            return Err(PetError::CorruptSaveData(format!(
                "{field} is not a finite number"
            )));
        }
    }
    if snapshot.age_seconds < 0.0 {
        return Err(PetError::CorruptSaveData("age_seconds is negative".into()));
    }
    Ok(())
}
