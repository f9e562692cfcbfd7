mod display;

use std::env;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, LevelFilter};

use alien_invasion::entities::SpriteSizes;
use alien_invasion::error::GameError;
use alien_invasion::frontend::Frontend;
use alien_invasion::game::Game;
use alien_invasion::geometry::{Point, Rect};
use alien_invasion::input::{Direction, HeldKeys, InputEvent};
use alien_invasion::settings::Settings;

use display::Viewport;

const FRAME: Duration = Duration::from_millis(10); // ≈100 FPS

const LOG_FILE: &str = "alien_invasion.log";

/// A direction key counts as held if its last press/repeat event arrived
/// within this many frames. Covers terminals that never send key-release
/// events; the OS key-repeat rate refreshes it well before it expires.
const HOLD_WINDOW: u64 = 12;

// ── Command line ──────────────────────────────────────────────────────────────

struct Options {
    config: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Result<Options, GameError> {
    let mut options = Options { config: None, verbose: false };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| GameError::Config("--config needs a file path".into()))?;
                options.config = Some(PathBuf::from(path));
            }
            "--verbose" => options.verbose = true,
            other => return Err(GameError::Config(format!("unknown argument '{}'", other))),
        }
    }
    Ok(options)
}

// ── Terminal frontend ─────────────────────────────────────────────────────────

fn direction_of(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Input model: key events arrive on a channel fed by a reader thread. Held
/// direction keys are tracked per frame so that terminals without key-release
/// support still produce a release once the OS stops repeating the key.
struct TerminalFrontend {
    out: BufWriter<Stdout>,
    rx: mpsc::Receiver<Event>,
    held: HeldKeys,
    frame: u64,
    frame_start: Instant,
    viewport: Viewport,
    world: Rect,
    /// Where Enter/`p` "click"; refreshed from the game on every render.
    play_button_center: Point,
}

impl TerminalFrontend {
    fn new(
        out: BufWriter<Stdout>,
        rx: mpsc::Receiver<Event>,
        game: &Game,
    ) -> std::io::Result<Self> {
        let world = game.settings.screen_rect();
        let (width, height) = terminal::size()?;
        Ok(TerminalFrontend {
            out,
            rx,
            held: HeldKeys::new(HOLD_WINDOW),
            frame: 0,
            frame_start: Instant::now(),
            viewport: Viewport::new(width, height, &world),
            world,
            play_button_center: game.play_button.rect.center(),
        })
    }

    fn translate_key(&mut self, key: KeyEvent, events: &mut Vec<InputEvent>) {
        let KeyEvent { code, kind, modifiers, .. } = key;

        if let Some(dir) = direction_of(&code) {
            let event = match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.held.press(dir, self.frame),
                KeyEventKind::Release => self.held.release(dir),
            };
            events.extend(event);
            return;
        }

        if kind != KeyEventKind::Press {
            return;
        }
        let event = match code {
            KeyCode::Char(' ') => InputEvent::Fire,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputEvent::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                InputEvent::Click(self.play_button_center)
            }
            _ => InputEvent::Unrecognized,
        };
        events.push(event);
    }

    fn translate_mouse(&self, mouse: MouseEvent) -> InputEvent {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .viewport
                .to_world(mouse.column, mouse.row)
                .map(InputEvent::Click)
                .unwrap_or(InputEvent::Unrecognized),
            _ => InputEvent::Unrecognized,
        }
    }
}

impl Frontend for TerminalFrontend {
    fn poll_events(&mut self) -> std::io::Result<Vec<InputEvent>> {
        self.frame_start = Instant::now();
        self.frame += 1;

        let mut events = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                Event::Key(key) => self.translate_key(key, &mut events),
                Event::Mouse(mouse) => events.push(self.translate_mouse(mouse)),
                Event::Resize(width, height) => {
                    self.viewport = Viewport::new(width, height, &self.world);
                    info!("Terminal resized to {}x{}", width, height);
                }
                _ => events.push(InputEvent::Unrecognized),
            }
        }
        events.extend(self.held.expire(self.frame));
        Ok(events)
    }

    fn render(&mut self, game: &Game) -> std::io::Result<()> {
        self.play_button_center = game.play_button.rect.center();
        display::render(&mut self.out, game, &self.viewport)
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn end_frame(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let options = parse_args()?;

    let level = if options.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    simple_logging::log_to_file(LOG_FILE, level)?;
    info!("Starting Alien Invasion.");

    let settings = match &options.config {
        Some(path) => {
            info!("Loading settings from {}", path.display());
            Settings::load(path).map_err(|e| {
                error!("Failed to load settings: {}", e);
                e
            })?
        }
        None => Settings::default(),
    };
    let mut game = Game::new(settings, SpriteSizes::default());

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from terminals that speak
    // the kitty protocol. HOLD_WINDOW expiry still runs everywhere.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    info!("Keyboard enhancement available: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = TerminalFrontend::new(out, rx, &game)
        .map_err(GameError::from)
        .and_then(|mut frontend| game.run(&mut frontend));

    // Always restore the terminal
    let mut out = stdout();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();

    if let Err(e) = &result {
        error!("Game stopped: {}", e);
    }
    info!("Exiting with high score {}.", game.stats.high_score);
    result
}
