//! PlaygroundView: maps a screen snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: a framed output panel on top (auto-scrolled to its last lines),
//! a command input strip along the bottom, and two optional overlays drawn
//! over the output panel: the centered scroll feed and the countdown box.

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything the view needs for one frame. Borrowed, never owned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenSnapshot<'a> {
    pub output: &'a str,
    /// Scroll feed overlay, when visible.
    pub feed: Option<&'a str>,
    /// Countdown overlay, when visible.
    pub countdown: Option<&'a str>,
    pub input: &'a str,
    /// Input cursor, in chars.
    pub cursor: usize,
}

/// Rectangles computed for a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub output_h: u16,
    pub input_y: u16,
    pub input_h: u16,
}

impl Layout {
    pub fn for_viewport(vp: Viewport) -> Self {
        // Input strip takes a tenth of the screen, but never less than 3 rows.
        let input_h = (vp.height / 10).max(3).min(vp.height);
        let output_h = vp.height - input_h;
        Self {
            output_h,
            input_y: output_h,
            input_h,
        }
    }
}

pub struct PlaygroundView {
    text: CellStyle,
    border: CellStyle,
    feed: CellStyle,
    countdown: CellStyle,
    input: CellStyle,
}

impl Default for PlaygroundView {
    fn default() -> Self {
        let black = Rgb::new(0, 0, 0);
        Self {
            text: CellStyle::new(Rgb::new(255, 255, 255), black),
            border: CellStyle::new(Rgb::new(0xf0, 0xf0, 0xf0), black),
            feed: CellStyle::new(Rgb::new(0, 255, 0), black),
            countdown: CellStyle::new(Rgb::new(255, 0, 0), black).bold(),
            input: CellStyle::new(Rgb::new(0xf6, 0xf6, 0xf6), Rgb::new(0x35, 0x35, 0x35)),
        }
    }
}

impl PlaygroundView {
    /// Render into an existing framebuffer, resizing it if needed.
    pub fn render_into(&self, snap: &ScreenSnapshot<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.text.cell(' '));
        if viewport.width < 4 || viewport.height < 6 {
            fb.put_str(0, 0, "too small", viewport.width, self.text);
            return;
        }

        let layout = Layout::for_viewport(viewport);
        self.draw_output(fb, snap.output, viewport.width, layout.output_h);
        if let Some(feed) = snap.feed {
            self.draw_feed(fb, feed, viewport.width, layout.output_h);
        }
        if let Some(countdown) = snap.countdown {
            self.draw_countdown(fb, countdown, viewport.width, layout.output_h);
        }
        self.draw_input(fb, snap.input, snap.cursor, viewport.width, layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &ScreenSnapshot<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_output(&self, fb: &mut FrameBuffer, output: &str, width: u16, height: u16) {
        fb.draw_frame(0, 0, width, height, self.border);
        let inner_w = width.saturating_sub(2);
        let inner_h = height.saturating_sub(2);
        draw_tail_lines(fb, output, 1, 1, inner_w, inner_h, self.text);
    }

    fn draw_feed(&self, fb: &mut FrameBuffer, feed: &str, width: u16, output_h: u16) {
        // 80% of the output panel, centered.
        let w = (width as u32 * 8 / 10) as u16;
        let h = (output_h as u32 * 8 / 10) as u16;
        let x = (width - w) / 2;
        let y = (output_h - h) / 2;
        fb.fill_rect(x, y, w, h, ' ', self.feed);
        draw_tail_lines(fb, feed, x, y, w, h, self.feed);
    }

    fn draw_countdown(&self, fb: &mut FrameBuffer, text: &str, width: u16, output_h: u16) {
        // Shrink-to-fit, at least 30% wide, two rows above the panel's bottom edge.
        let text_w = text.chars().count().min(u16::MAX as usize) as u16;
        let w = text_w.max((width as u32 * 3 / 10) as u16).min(width.saturating_sub(2));
        let x = (width - w) / 2;
        let y = output_h.saturating_sub(3);
        fb.fill_rect(x, y, w, 1, ' ', self.countdown);
        let tx = x + w.saturating_sub(text_w) / 2;
        fb.put_str(tx, y, text, w, self.countdown);
    }

    fn draw_input(&self, fb: &mut FrameBuffer, input: &str, cursor: usize, width: u16, layout: Layout) {
        fb.fill_rect(0, layout.input_y, width, layout.input_h, ' ', self.input);
        // Padding: one row from the top, two columns from the left.
        let y = layout.input_y + 1;
        let x = 2;
        let avail = width.saturating_sub(x + 1);
        if avail == 0 {
            return;
        }

        // Keep the cursor on screen for long lines.
        let chars: Vec<char> = input.chars().collect();
        let cursor = cursor.min(chars.len());
        let start = (cursor + 1).saturating_sub(avail as usize);
        let visible: String = chars[start..].iter().collect();
        fb.put_str(x, y, &visible, avail, self.input);

        let cx = x + (cursor - start) as u16;
        let under = fb.get(cx, y).map(|c| c.ch).unwrap_or(' ');
        fb.put_char(cx, y, under, self.input.inverted());
    }
}

/// Draw the last `h` lines of `text` into the box at `(x, y, w, h)`.
fn draw_tail_lines(fb: &mut FrameBuffer, text: &str, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if h == 0 || text.is_empty() {
        return;
    }
    let lines: Vec<&str> = text.split('\n').collect();
    let skip = lines.len().saturating_sub(h as usize);
    for (row, line) in lines[skip..].iter().enumerate() {
        fb.put_str(x, y + row as u16, line, w, style);
    }
}
