//! Headless host: runs a line-based script against a book, with the
//! in-memory scene as render surface and a simulated frame clock.

use anyhow::{Context, Result, anyhow, bail};
use photobook_core::{AnimationEvent, Animator, Book, BookCommand, BookSnapshot, Effect, Scene};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, trace};

const FRAME: Duration = Duration::from_millis(16);
/// Upper bound for `settle`, far beyond any real turn.
const MAX_SETTLE_FRAMES: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptCommand {
    Next,
    Prev,
    Page(i64),
    Down(f64),
    Move(f64),
    Up,
    Tick(u64),
    Settle,
    Snapshot,
    Scene,
}

fn argument<T: std::str::FromStr>(word: &str, value: Option<&str>) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = value.ok_or_else(|| anyhow!("`{word}` needs an argument"))?;
    value
        .parse()
        .with_context(|| format!("Invalid argument for `{word}`: {value}"))
}

/// Parse one script line; blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let command = match word {
        "next" => ScriptCommand::Next,
        "prev" => ScriptCommand::Prev,
        "page" => ScriptCommand::Page(argument(word, words.next())?),
        "down" => ScriptCommand::Down(argument(word, words.next())?),
        "move" => ScriptCommand::Move(argument(word, words.next())?),
        "up" => ScriptCommand::Up,
        "tick" => ScriptCommand::Tick(argument(word, words.next())?),
        "settle" => ScriptCommand::Settle,
        "snapshot" => ScriptCommand::Snapshot,
        "scene" => ScriptCommand::Scene,
        other => bail!("Unknown command `{other}`"),
    };
    if let Some(extra) = words.next() {
        bail!("Unexpected trailing input `{extra}`");
    }
    Ok(Some(command))
}

pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(line).with_context(|| format!("Line {}", idx + 1))? {
            commands.push(command);
        }
    }
    Ok(commands)
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Snapshot {
        elapsed_ms: u64,
        snapshot: BookSnapshot,
    },
    Scene {
        elapsed_ms: u64,
        scene: &'a Scene,
    },
}

pub struct Driver {
    book: Book,
    scene: Scene,
    animator: Animator,
    half_width: f64,
    elapsed: Duration,
}

impl Driver {
    pub fn new(book: Book, book_width: f64) -> Self {
        let mut scene = Scene::new();
        scene.apply(&book.open());
        Self {
            book,
            scene,
            animator: Animator::new(),
            half_width: book_width / 2.0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn run(&mut self, commands: &[ScriptCommand], out: &mut impl Write) -> Result<()> {
        for command in commands {
            self.execute(*command, out)?;
        }
        out.flush().context("Failed to flush output")
    }

    pub fn execute(&mut self, command: ScriptCommand, out: &mut impl Write) -> Result<()> {
        debug!(?command, "Script command");
        match command {
            ScriptCommand::Next => self.dispatch(BookCommand::Next),
            ScriptCommand::Prev => self.dispatch(BookCommand::Previous),
            ScriptCommand::Page(page) => self.dispatch(BookCommand::SetPage { page }),
            ScriptCommand::Down(x) => self.dispatch(BookCommand::PointerDown {
                x: x - self.half_width,
            }),
            ScriptCommand::Move(x) => self.dispatch(BookCommand::PointerMove {
                x: x - self.half_width,
            }),
            ScriptCommand::Up => self.dispatch(BookCommand::PointerUp),
            ScriptCommand::Tick(ms) => self.tick(Duration::from_millis(ms)),
            ScriptCommand::Settle => self.settle(),
            ScriptCommand::Snapshot => {
                let record = Record::Snapshot {
                    elapsed_ms: self.elapsed_ms(),
                    snapshot: self.book.snapshot(),
                };
                write_record(out, &record)?;
            }
            ScriptCommand::Scene => {
                let record = Record::Scene {
                    elapsed_ms: self.elapsed_ms(),
                    scene: &self.scene,
                };
                write_record(out, &record)?;
            }
        }
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    fn dispatch(&mut self, command: BookCommand) {
        let event = self.book.apply_command(command);
        trace!(action = event.action, effects = event.effects.len(), "Applied command");
        self.apply(&event.effects);
    }

    fn apply(&mut self, effects: &[Effect]) {
        for plan in self.scene.apply(effects) {
            self.animator.start(plan);
        }
    }

    fn tick(&mut self, duration: Duration) {
        let mut remaining = duration;
        while !remaining.is_zero() {
            let dt = remaining.min(FRAME);
            self.frame(dt);
            remaining -= dt;
        }
    }

    fn settle(&mut self) {
        let mut frames = 0;
        while !self.animator.is_idle() && frames < MAX_SETTLE_FRAMES {
            self.frame(FRAME);
            frames += 1;
        }
    }

    fn frame(&mut self, dt: Duration) {
        self.elapsed += dt;
        for event in self.animator.advance(dt) {
            let command = match event {
                AnimationEvent::Step { page, angle } => BookCommand::AnimationStep { page, angle },
                AnimationEvent::Complete { page } => BookCommand::TurnComplete { page },
            };
            self.dispatch(command);
        }
    }
}

fn write_record(out: &mut impl Write, record: &Record<'_>) -> Result<()> {
    let line = serde_json::to_string(record).context("Failed to encode output record")?;
    writeln!(out, "{line}").context("Failed to write output record")
}
