//! Window state and layout, kept free of terminal I/O.

use std::time::{Duration, Instant};

use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    style::Color,
};
use tama_core::{Action, Pet, SaveFile, Vital, config::FaceTable};
use tracing::{debug, error};

const BAR_WIDTH: usize = 20;
const WAITING: &str = "Your pet is waiting...";
const IDLE_STATUS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Act(Action),
    Save,
    Quit,
}

/// Buttons are number keys; `s` saves, `q`, Esc and Ctrl-C quit.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Input::Quit);
    }
    match key.code {
        KeyCode::Char('1') => Some(Input::Act(Action::Feed)),
        KeyCode::Char('2') => Some(Input::Act(Action::Play)),
        KeyCode::Char('3') => Some(Input::Act(Action::Sleep)),
        KeyCode::Char('4') => Some(Input::Act(Action::Pet)),
        KeyCode::Char('5') => Some(Input::Act(Action::Insult)),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Input::Save),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub text: String,
    pub color: Option<Color>,
}

impl Row {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

pub struct WindowApp {
    pet: Pet,
    store: SaveFile,
    faces: FaceTable,
    action_display: Duration,
    status: String,
    reset_at: Option<Instant>,
}

impl WindowApp {
    pub fn new(pet: Pet, store: SaveFile, faces: FaceTable, action_display: Duration) -> Self {
        let mut app = Self {
            pet,
            store,
            faces,
            action_display,
            status: WAITING.into(),
            reset_at: None,
        };
        if !app.pet.is_alive() {
            app.mark_dead();
        }
        app
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// The periodic timer keeps re-arming only while the pet lives.
    pub fn is_ticking(&self) -> bool {
        self.pet.is_alive()
    }

    pub fn on_tick(&mut self, now_secs: f64, now: Instant) {
        if self.reset_at.is_some_and(|at| now >= at) {
            self.reset_at = None;
            self.pet.reset_action();
            self.status = IDLE_STATUS.into();
        }

        let was_alive = self.pet.is_alive();
        self.pet.tick(now_secs);
        if was_alive && !self.pet.is_alive() {
            self.mark_dead();
        }
    }

    fn mark_dead(&mut self) {
        self.reset_at = None;
        self.status = format!("{} has passed away...", self.pet.name());
    }

    /// Returns true when the window should close.
    pub fn on_input(&mut self, input: Input, now: Instant) -> bool {
        match input {
            Input::Act(action) => {
                if self.pet.perform_action(action).is_err() {
                    debug!(%action, "ignored action on dead pet");
                    return false;
                }
                if self.pet.is_alive() {
                    self.status = status_message(action, self.pet.name());
                    self.reset_at = Some(now + self.action_display);
                } else {
                    self.mark_dead();
                }
                false
            }
            Input::Save => {
                self.status = match self.save() {
                    Ok(()) => "Saved.".into(),
                    Err(err) => format!("Couldn't save: {err}"),
                };
                false
            }
            Input::Quit => {
                self.save_best_effort();
                true
            }
        }
    }

    fn save(&self) -> Result<(), tama_core::PetError> {
        self.store.save(&self.pet.to_snapshot())
    }

    pub fn save_best_effort(&self) {
        if let Err(err) = self.save() {
            error!(%err, "final save failed");
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        let pet = &self.pet;
        let mut rows = vec![
            Row::plain(pet.name()),
            Row::colored(format!("Mood: {}", pet.mood()), Color::DarkGrey),
            Row::plain(""),
            Row::plain(format!("   {}", self.faces.face_for(pet))),
            Row::plain(""),
        ];
        let status_color = if pet.is_alive() {
            Color::Blue
        } else {
            Color::Red
        };
        rows.push(Row::colored(self.status.clone(), status_color));
        rows.push(Row::plain(""));
        for vital in Vital::ALL {
            rows.push(Row::plain(stat_bar(vital, pet.vital(vital))));
        }
        rows.push(Row::plain(""));
        rows.push(Row::plain("[1] Feed   [2] Play    [3] Sleep"));
        rows.push(Row::plain("[4] Pet    [5] Insult  [s] Save   [q] Quit"));
        rows.push(Row::plain(""));
        rows.push(Row::colored(
            format!("Age: {}s", pet.age_seconds() as u64),
            Color::DarkGrey,
        ));
        rows
    }
}

fn status_message(action: Action, name: &str) -> String {
    match action {
        Action::Feed => format!("{name} munches on food."),
        Action::Play => format!("You played with {name}!"),
        Action::Sleep => format!("{name} takes a quick nap."),
        Action::Pet => format!("{name} purrs."),
        Action::Insult => format!("{name} is offended!"),
    }
}

pub fn stat_bar(vital: Vital, value: f64) -> String {
    let filled = ((value / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{:<10} {}{} {:>3}",
        vital.label(),
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        value as u32
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_in(dir: &tempfile::TempDir, pet: Pet) -> WindowApp {
        WindowApp::new(
            pet,
            SaveFile::new(dir.path().join("save.json")),
            FaceTable::default(),
            Duration::from_secs(1),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_buttons() {
        assert_eq!(map_key(key(KeyCode::Char('1'))), Some(Input::Act(Action::Feed)));
        assert_eq!(map_key(key(KeyCode::Char('5'))), Some(Input::Act(Action::Insult)));
        assert_eq!(map_key(key(KeyCode::Char('s'))), Some(Input::Save));
        assert_eq!(map_key(key(KeyCode::Esc)), Some(Input::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Quit)
        );
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn bars_scale_with_value() {
        assert_eq!(
            stat_bar(Vital::Hunger, 100.0),
            format!("Hunger     {} 100", "█".repeat(20))
        );
        assert_eq!(
            stat_bar(Vital::Energy, 50.0),
            format!("Energy     {}{}  50", "█".repeat(10), "░".repeat(10))
        );
        assert!(stat_bar(Vital::Happiness, 0.0).ends_with("░   0"));
    }

    #[test]
    fn action_shows_then_reverts_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, Pet::new("Rex", 0.0));
        let start = Instant::now();

        assert!(!app.on_input(Input::Act(Action::Pet), start));
        assert_eq!(app.status(), "Rex purrs.");
        assert_eq!(app.pet().current_action(), Some(Action::Pet));

        app.on_tick(0.1, start + Duration::from_millis(500));
        assert_eq!(app.pet().current_action(), Some(Action::Pet));

        app.on_tick(0.2, start + Duration::from_millis(1_000));
        assert_eq!(app.pet().current_action(), None);
        assert_eq!(app.status(), "...");
    }

    #[test]
    fn death_stops_the_timer() {
        let dir = tempfile::tempdir().unwrap();
        let pet = Pet::new("Rex", 0.0).with_decay_coefficient(0.5);
        let mut app = app_in(&dir, pet);
        assert!(app.is_ticking());

        app.on_tick(400.0, Instant::now());
        assert!(!app.pet().is_alive());
        assert!(!app.is_ticking());
        assert_eq!(app.status(), "Rex has passed away...");

        let rows = app.rows();
        assert!(rows.iter().any(|r| r.text.contains("(x_x)")));
        assert!(rows.iter().any(|r| r.text == "Mood: dead"));
        assert!(
            rows.iter()
                .any(|r| r.text == "Rex has passed away..." && r.color == Some(Color::Red))
        );

        assert!(!app.on_input(Input::Act(Action::Feed), Instant::now()));
        assert_eq!(app.pet().hunger(), 0.0);
    }

    #[test]
    fn loaded_dead_pet_shows_passing() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = tama_core::PetSnapshot {
            alive: false,
            ..Pet::new("Rex", 0.0).to_snapshot()
        };
        let app = app_in(&dir, Pet::from_snapshot(snapshot).unwrap());
        assert!(!app.is_ticking());
        assert_eq!(app.status(), "Rex has passed away...");
        assert!(
            app.rows()
                .iter()
                .any(|r| r.text == "Rex has passed away..." && r.color == Some(Color::Red))
        );
    }

    #[test]
    fn quit_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, Pet::new("Rex", 0.0));
        app.on_input(Input::Act(Action::Feed), Instant::now());
        assert!(app.on_input(Input::Quit, Instant::now()));
        let saved = SaveFile::new(dir.path().join("save.json")).load().unwrap();
        assert_eq!(saved.map(|s| s.name), Some("Rex".to_string()));
    }

    #[test]
    fn layout_shows_vitals_and_age() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir, Pet::new("Rex", 0.0).with_decay_coefficient(0.0));
        app.on_tick(42.9, Instant::now());
        let rows = app.rows();
        assert_eq!(rows[0].text, "Rex");
        assert_eq!(rows[5].text, "Your pet is waiting...");
        assert!(rows.iter().any(|r| r.text.starts_with("Happiness ")));
        assert_eq!(rows.last().unwrap().text, "Age: 42s");
    }
}
