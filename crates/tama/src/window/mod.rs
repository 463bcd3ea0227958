//! Full-screen front-end driven by a periodic timer on one thread.

mod view;

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyEventKind},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use tama_core::{SaveFile, clock::now_epoch_secs, config::AppConfig};
use tracing::{info, warn};

use view::{Row, WindowApp, map_key};

struct Screen {
    out: Stdout,
}

impl Screen {
    fn begin() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on Drop restores the terminal, even if entering fails.
        let mut screen = Self { out: io::stdout() };
        execute!(
            screen.out,
            EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        Ok(screen)
    }

    fn draw(&mut self, rows: &[Row]) -> Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        for (line, row) in rows.iter().enumerate() {
            queue!(self.out, cursor::MoveTo(2, line as u16 + 1))?;
            match row.color {
                Some(color) => queue!(
                    self.out,
                    SetForegroundColor(color),
                    Print(&row.text),
                    ResetColor
                )?,
                None => queue!(self.out, Print(&row.text))?,
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.out, ResetColor, cursor::Show, LeaveAlternateScreen);
    }
}

/// Asks for a name on the normal screen before the window takes over.
fn ask_name() -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Name your creature: ")?;
    stdout.flush()?;
    let mut name = String::new();
    io::stdin().read_line(&mut name)?;
    Ok(name)
}

pub async fn run(config: AppConfig) -> Result<()> {
    let store = SaveFile::new(&config.storage.save_path);
    let pet = match store.load_pet(config.storage.restore_policy(), now_epoch_secs()) {
        Some(pet) => pet.with_decay_coefficient(config.pet.decay_coefficient()),
        None => {
            let name = ask_name()?;
            let pet = config.pet.hatch(&name, now_epoch_secs());
            info!(name = pet.name(), "hatched a new pet");
            pet
        }
    };

    let mut app = WindowApp::new(
        pet,
        store,
        config.faces.clone(),
        config.window.action_display(),
    );
    let interval = config.window.tick_interval();

    let mut screen = Screen::begin()?;
    let mut events = EventStream::new();
    let mut next_tick = tokio::time::Instant::now();

    loop {
        screen.draw(&app.rows())?;

        tokio::select! {
            _ = tokio::time::sleep_until(next_tick), if app.is_ticking() => {
                app.on_tick(now_epoch_secs(), std::time::Instant::now());
                // Re-arm after the tick completes.
                next_tick = tokio::time::Instant::now() + interval;
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(input) = map_key(key) {
                        if app.on_input(input, std::time::Instant::now()) {
                            break;
                        }
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(?err, "terminal event stream failed");
                    app.save_best_effort();
                    return Err(err.into());
                }
                None => {
                    app.save_best_effort();
                    break;
                }
            },
        }
    }

    drop(screen);
    info!(name = app.pet().name(), "window closed");
    Ok(())
}
