use std::{fmt, str::FromStr};

use crate::error::PetError;

use super::Vital;

/// A discrete thing the user can do to the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Feed,
    Play,
    Sleep,
    Pet,
    Insult,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Feed,
        Action::Play,
        Action::Sleep,
        Action::Pet,
        Action::Insult,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Feed => "feed",
            Action::Play => "play",
            Action::Sleep => "sleep",
            Action::Pet => "pet",
            Action::Insult => "insult",
        }
    }

    /// The vital adjustments this action applies, in order.
    pub fn effects(self) -> &'static [(Vital, f64)] {
        match self {
            Action::Feed => &[(Vital::Hunger, 20.0)],
            Action::Play => &[(Vital::Happiness, 20.0), (Vital::Energy, -10.0)],
            Action::Sleep => &[(Vital::Energy, 30.0), (Vital::Hunger, -10.0)],
            Action::Pet => &[(Vital::Happiness, 10.0)],
            Action::Insult => &[(Vital::Happiness, -20.0)],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Action::ALL
            .into_iter()
            .find(|action| action.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PetError::InvalidAction(wanted.to_string()))
    }
}

/// One line of user input, already matched against the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Save,
    Quit,
}

impl FromStr for Command {
    type Err = PetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        match input.as_str() {
            "save" => Ok(Command::Save),
            "quit" => Ok(Command::Quit),
            other => other.parse().map(Command::Act),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!("FEED".parse::<Command>().unwrap(), Command::Act(Action::Feed));
        assert_eq!("  Insult \n".parse::<Command>().unwrap(), Command::Act(Action::Insult));
        assert_eq!("Save".parse::<Command>().unwrap(), Command::Save);
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_unknown_input() {
        match "dance".parse::<Command>() {
            Err(PetError::InvalidAction(input)) => assert_eq!(input, "dance"),
            other => panic!("expected InvalidAction, got {other:?}"),
        }
        assert!("".parse::<Command>().is_err());
        assert!("feed me".parse::<Command>().is_err());
    }

    #[test]
    fn action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
    }
}
