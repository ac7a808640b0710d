use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

/// Logical keys the wizard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Next,
    Previous,
    Quit,
    Interrupt,
    ScrollUp(u16),
    ScrollDown(u16),
    Other,
}

impl Key {
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::Key(key) => Self::from_key_event(key),
            _ => Key::Other,
        }
    }

    pub fn from_key_event(key: &KeyEvent) -> Self {
        if key.kind != KeyEventKind::Press {
            return Key::Other;
        }

        // Ctrl+C interrupts; any other Ctrl+letter acts as the plain letter.
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return Key::Interrupt;
        }

        match key.code {
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'n' => Key::Next,
                'p' => Key::Previous,
                'q' => Key::Quit,
                _ => Key::Other,
            },
            KeyCode::Up => Key::ScrollUp(1),
            KeyCode::Down => Key::ScrollDown(1),
            KeyCode::PageUp => Key::ScrollUp(10),
            KeyCode::PageDown => Key::ScrollDown(10),
            _ => Key::Other,
        }
    }
}

/// Why the wizard stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Interrupted,
    InputClosed,
}

impl ExitReason {
    pub fn farewell(self) -> &'static str {
        match self {
            ExitReason::Quit | ExitReason::InputClosed => "Setup wizard closed.",
            ExitReason::Interrupted => "Setup wizard interrupted.",
        }
    }

    /// Extra dimmed line printed under the farewell, if any.
    pub fn restart_hint(self) -> Option<String> {
        match self {
            ExitReason::Quit | ExitReason::InputClosed => Some(format!(
                "You can restart anytime with: {}",
                env!("CARGO_PKG_NAME")
            )),
            ExitReason::Interrupted => None,
        }
    }
}

/// Result of feeding one key to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; the page must be drawn again.
    Redraw,
    Unchanged,
    Exit(ExitReason),
}

/// Current position within a catalog of `len` pages.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: usize,
    len: usize,
    scroll: u16,
    max_scroll: u16,
}

impl Navigator {
    /// # Panics
    ///
    /// If `len` is zero. A validated `Catalog` is never empty.
    pub fn new(len: usize) -> Self {
        let nav = Self {
            current: 0,
            len,
            scroll: 0,
            max_scroll: 0,
        };
        assert!(!nav.is_empty(), "navigator needs at least one page");
        nav
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Set how far the current body can scroll, as measured by the last draw.
    pub fn set_max_scroll(&mut self, max_scroll: u16) {
        self.max_scroll = max_scroll;
        self.scroll = self.scroll.min(max_scroll);
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len
    }

    pub fn on_key(&mut self, key: Key) -> Outcome {
        match key {
            Key::Next => {
                if self.is_last() {
                    return Outcome::Unchanged;
                }
                self.current += 1;
                self.scroll = 0;
                self.max_scroll = 0;
                debug!("moved to page {}/{}", self.current + 1, self.len);
                Outcome::Redraw
            }
            Key::Previous => {
                if self.is_first() {
                    return Outcome::Unchanged;
                }
                self.current -= 1;
                self.scroll = 0;
                self.max_scroll = 0;
                debug!("moved to page {}/{}", self.current + 1, self.len);
                Outcome::Redraw
            }
            Key::Quit => Outcome::Exit(ExitReason::Quit),
            Key::Interrupt => Outcome::Exit(ExitReason::Interrupted),
            Key::ScrollUp(n) => {
                let scroll = self.scroll.saturating_sub(n);
                self.set_scroll(scroll)
            }
            Key::ScrollDown(n) => {
                let scroll = self.scroll.saturating_add(n).min(self.max_scroll);
                self.set_scroll(scroll)
            }
            Key::Other => Outcome::Unchanged,
        }
    }

    fn set_scroll(&mut self, scroll: u16) -> Outcome {
        if scroll == self.scroll {
            Outcome::Unchanged
        } else {
            self.scroll = scroll;
            Outcome::Redraw
        }
    }
}
