use std::fmt;

pub const VITAL_MIN: f64 = 0.0;
pub const VITAL_MAX: f64 = 100.0;

/// The three needs a pet has. Each lives in `[VITAL_MIN, VITAL_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vital {
    Hunger,
    Happiness,
    Energy,
}

impl Vital {
    pub const ALL: [Vital; 3] = [Vital::Hunger, Vital::Happiness, Vital::Energy];

    pub fn label(self) -> &'static str {
        match self {
            Vital::Hunger => "Hunger",
            Vital::Happiness => "Happiness",
            Vital::Energy => "Energy",
        }
    }

    /// Vitals whose depletion kills the pet.
    pub fn is_fatal_at_zero(self) -> bool {
        matches!(self, Vital::Hunger | Vital::Energy)
    }
}

impl fmt::Display for Vital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn clamp_vital(value: f64) -> f64 {
    value.clamp(VITAL_MIN, VITAL_MAX)
}
