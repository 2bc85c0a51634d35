//! Cybermaint playground (default binary).
//!
//! Interactive command prompt for the terminal effects.
//! It uses crossterm for input and the framebuffer-based renderer from
//! `cybermaint::term`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use cybermaint::input::{map_key, should_quit, LineEditor};
use cybermaint::playground::{Outcome, Playground};
use cybermaint::runtime::{logging, Config};
use cybermaint::term::{FrameBuffer, PlaygroundView, TerminalRenderer, Viewport};

/// Longest input wait when no effect is due.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(&config)?;
    let mut playground = Playground::from_config(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut playground);

    // Always try to restore terminal state.
    playground.shutdown();
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, playground: &mut Playground) -> Result<()> {
    let view = PlaygroundView::default();
    let mut editor = LineEditor::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut input_changed = true;
    let mut last_advance = Instant::now();

    loop {
        // Render.
        let effects_changed = playground.screen_mut().take_redraw();
        if input_changed || effects_changed {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let line = editor.text();
            let snap = playground.screen().snapshot(&line, editor.cursor());
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            input_changed = false;
        }

        // Input with timeout until the next due tick.
        let timeout = playground
            .next_due_ms()
            .map(Duration::from_millis)
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);
        let ready = event::poll(timeout)?;

        // Tick before handling input, so effects started below begin at "now".
        let elapsed = last_advance.elapsed().as_millis() as u64;
        if elapsed > 0 {
            last_advance += Duration::from_millis(elapsed);
            playground.advance(elapsed);
        }

        if !ready {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                let Some(input) = map_key(key) else {
                    continue;
                };
                input_changed = true;
                if let Some(line) = editor.apply(input) {
                    if playground.execute(&line) == Outcome::Exit {
                        return Ok(());
                    }
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                input_changed = true;
            }
            _ => {}
        }
    }
}
