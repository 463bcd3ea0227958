use std::fmt;

/// Label derived from `happiness + energy - hunger`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Chillin,
    Meh,
    Grumpy,
    Miserable,
    Dead,
}

impl Mood {
    /// Maps a score onto the mood bands. Bands are half-open so fractional
    /// scores always land somewhere.
    pub fn from_score(score: f64) -> Self {
        if score >= 140.0 {
            Mood::Happy
        } else if score >= 90.0 {
            Mood::Chillin
        } else if score >= 40.0 {
            Mood::Meh
        } else if score > 0.0 {
            Mood::Grumpy
        } else {
            Mood::Miserable
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Chillin => "chillin",
            Mood::Meh => "meh",
            Mood::Grumpy => "grumpy",
            Mood::Miserable => "miserable",
            Mood::Dead => "dead",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
