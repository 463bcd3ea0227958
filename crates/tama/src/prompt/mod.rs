//! Line-oriented front-end: redraw, read a command, react, repeat.

use std::{
    fmt::Write as _,
    io::{self, Write},
};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use tama_core::{
    Action, Command, Pet, PetError, SaveFile, Vital, clock::now_epoch_secs, config::AppConfig,
    config::FaceTable,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

const COMMAND_LIST: &str = "Commands: feed, play, sleep, pet, insult, save, quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub struct PromptSession {
    pet: Pet,
    store: SaveFile,
    faces: FaceTable,
}

impl PromptSession {
    pub fn new(pet: Pet, store: SaveFile, faces: FaceTable) -> Self {
        Self { pet, store, faces }
    }

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn tick(&mut self) {
        self.pet.tick(now_epoch_secs());
    }

    pub fn render(&self) -> String {
        render(&self.pet, &self.faces)
    }

    /// Reacts to one line of input and returns what to tell the user.
    pub fn handle_line(&mut self, line: &str) -> (String, Step) {
        match line.parse::<Command>() {
            Ok(Command::Act(action)) => match self.pet.perform_action(action) {
                Ok(()) => (action_message(action, self.pet.name()), Step::Continue),
                Err(PetError::ActionOnDeadPet) => (
                    format!("{} can't do that anymore", self.pet.name()),
                    Step::Continue,
                ),
                Err(err) => (err.to_string(), Step::Continue),
            },
            Ok(Command::Save) => match self.save() {
                Ok(()) => ("saved".into(), Step::Continue),
                Err(err) => (format!("couldn't save: {err}"), Step::Continue),
            },
            Ok(Command::Quit) => {
                self.save_best_effort();
                ("ok bye".into(), Step::Quit)
            }
            Err(_) => ("what is even that".into(), Step::Continue),
        }
    }

    fn save(&self) -> Result<(), PetError> {
        self.store.save(&self.pet.to_snapshot())
    }

    pub fn save_best_effort(&self) {
        if let Err(err) = self.save() {
            error!(%err, "final save failed");
        }
    }
}

fn action_message(action: Action, name: &str) -> String {
    match action {
        Action::Feed => format!("{name} munches"),
        Action::Play => format!("You play with {name}!"),
        Action::Sleep => format!("{name} takes a nap"),
        Action::Pet => format!("{name} enjoys the pets"),
        Action::Insult => format!("{name} is offended and unhappy"),
    }
}

pub fn render(pet: &Pet, faces: &FaceTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Your Pet: {}", pet.name());
    let _ = writeln!(out, "   {}", faces.face_for(pet));
    let _ = writeln!(out);
    let _ = writeln!(out, "Age: {}s", pet.age_seconds() as u64);
    let _ = writeln!(out, "Mood: {}", pet.mood());
    let _ = writeln!(out);
    for vital in Vital::ALL {
        let label = format!("{}:", vital.label());
        let _ = writeln!(out, "{label:<11}{}", pet.vital(vital) as u32);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{COMMAND_LIST}");
    out
}

fn draw(screen: &str) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(stdout, "{screen}")?;
    stdout.flush()?;
    Ok(())
}

fn ask(question: &str) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{question}")?;
    stdout.flush()?;
    Ok(())
}

pub async fn run(config: AppConfig) -> Result<()> {
    let store = SaveFile::new(&config.storage.save_path);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let pet = match store.load_pet(config.storage.restore_policy(), now_epoch_secs()) {
        Some(pet) => pet.with_decay_coefficient(config.pet.decay_coefficient()),
        None => {
            ask("name your creature: ")?;
            let name = lines.next_line().await?.unwrap_or_default();
            let pet = config.pet.hatch(&name, now_epoch_secs());
            info!(name = pet.name(), "hatched a new pet");
            pet
        }
    };

    let mut session = PromptSession::new(pet, store, config.faces.clone());
    let pause = config.prompt.message_pause();

    loop {
        session.tick();

        if !session.pet().is_alive() {
            draw(&session.render())?;
            println!("nooo your pet is dead");
            session.save_best_effort();
            return Ok(());
        }

        draw(&session.render())?;
        ask("> ")?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            session.save_best_effort();
            println!();
            println!("ok bye");
            return Ok(());
        };

        let (message, step) = session.handle_line(&line);
        println!("{message}");
        if step == Step::Quit {
            return Ok(());
        }
        tokio::time::sleep(pause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_in(dir: &tempfile::TempDir) -> PromptSession {
        PromptSession::new(
            Pet::new("Rex", now_epoch_secs()),
            SaveFile::new(dir.path().join("save.json")),
            FaceTable::default(),
        )
    }

    #[test]
    fn renders_fresh_pet() {
        let pet = Pet::new("Rex", 0.0);
        let screen = render(&pet, &FaceTable::default());
        assert!(screen.starts_with("Your Pet: Rex\n   (ᵔᴥᵔ)\n"));
        assert!(screen.contains("Age: 0s"));
        assert!(screen.contains("Mood: chillin"));
        assert!(screen.contains("Hunger:    100"));
        assert!(screen.contains("Happiness: 100"));
        assert!(screen.contains("Energy:    100"));
        assert!(screen.contains(COMMAND_LIST));
    }

    #[test]
    fn render_truncates_vitals() {
        let mut pet = Pet::new("Rex", 0.0);
        pet.tick(10.0);
        let screen = render(&pet, &FaceTable::default());
        assert!(screen.contains("Hunger:    99\n"));
        assert!(screen.contains("Age: 10s"));
    }

    #[test]
    fn actions_reply_and_mutate() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        let (message, step) = session.handle_line(" PLAY ");
        assert_eq!(message, "You play with Rex!");
        assert_eq!(step, Step::Continue);
        assert_eq!(session.pet().energy(), 90.0);
        assert!(session.render().contains("(ᐛ)"));
    }

    #[test]
    fn unknown_input_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        let before = session.pet().to_snapshot();
        let (message, step) = session.handle_line("juggle");
        assert_eq!(message, "what is even that");
        assert_eq!(step, Step::Continue);
        assert_eq!(session.pet().to_snapshot(), before);
    }

    #[test]
    fn save_and_quit_write_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        assert_eq!(session.handle_line("save").0, "saved");
        assert!(dir.path().join("save.json").exists());

        session.handle_line("feed");
        let (message, step) = session.handle_line("quit");
        assert_eq!((message.as_str(), step), ("ok bye", Step::Quit));
        let saved = SaveFile::new(dir.path().join("save.json")).load().unwrap().unwrap();
        assert_eq!(saved.name, "Rex");
    }

    #[test]
    fn dead_pet_gets_soft_notice() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session.pet.apply_delta(Vital::Hunger, -100.0);
        let (message, _) = session.handle_line("feed");
        assert_eq!(message, "Rex can't do that anymore");
        assert_eq!(session.pet().hunger(), 0.0);
        assert!(session.render().contains("(x_x)"));
        assert!(session.render().contains("Mood: dead"));
    }
}
