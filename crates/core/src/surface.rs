//! Display surface capability.
//!
//! Effects never own the display. They borrow a [`Surface`] for the length of
//! one engine step and only use the four operations below. The host decides
//! which region of its display an effect sees through a [`Target`] projection.

/// The narrow buffer capability every effect is written against.
pub trait Surface {
    /// Full current content.
    fn content(&self) -> &str;

    /// Replace the full content.
    fn set_content(&mut self, text: &str);

    /// Append one line after the existing content.
    fn append_line(&mut self, line: &str);

    /// Ask the host to flush this surface to the terminal.
    fn request_redraw(&mut self);
}

/// Projects a host display `H` onto the surface an effect mutates.
///
/// A plain function pointer keeps mutators `Send` and lets one host type
/// expose several independent regions.
pub type Target<H> = fn(&mut H) -> &mut dyn Surface;

/// Target for hosts that are themselves a single surface.
pub fn whole<S: Surface>(surface: &mut S) -> &mut dyn Surface {
    surface
}

/// In-memory text region.
///
/// Lines are the `\n`-separated segments of the content, so `append_line`
/// and `set_content` always agree on what the region holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    pending_redraws: u32,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(text: &str) -> Self {
        Self {
            content: text.to_string(),
            pending_redraws: 0,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        // An empty buffer has no lines, not one empty line.
        let content = if self.content.is_empty() {
            None
        } else {
            Some(self.content.as_str())
        };
        content.into_iter().flat_map(|c| c.split('\n'))
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.pending_redraws += 1;
    }

    /// Redraw requests since the last call; resets the counter.
    pub fn take_redraw(&mut self) -> bool {
        let pending = self.pending_redraws > 0;
        self.pending_redraws = 0;
        pending
    }

    pub fn pending_redraws(&self) -> u32 {
        self.pending_redraws
    }
}

impl Surface for TextBuffer {
    fn content(&self) -> &str {
        &self.content
    }

    fn set_content(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
    }

    fn append_line(&mut self, line: &str) {
        if !self.content.is_empty() {
            self.content.push('\n');
        }
        self.content.push_str(line);
    }

    fn request_redraw(&mut self) {
        self.pending_redraws = self.pending_redraws.saturating_add(1);
    }
}
