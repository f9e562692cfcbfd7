use std::io;
use std::time::Duration;

use crate::game::Game;
use crate::input::InputEvent;

/// Everything the game loop needs from the outside world: input, drawing and
/// wall-clock waits. The terminal binary implements it; tests script it.
pub trait Frontend {
    /// Every event that arrived since the previous call, without blocking.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;

    /// Draw the current state. Must not mutate the game.
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Freeze the whole loop: no input, no drawing.
    fn pause(&mut self, duration: Duration);

    /// Called once at the end of every frame, e.g. to keep a steady frame rate.
    fn end_frame(&mut self) {}
}
