use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Paste(String),
    FocusGained,
    FocusLost,
}

impl InputEvent {
    pub fn is_key(&self) -> bool {
        matches!(self, InputEvent::Key(_))
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::Key(e) => Some(e),
            _ => None,
        }
    }

    /// Key releases are reported by some terminals; the app only acts on presses and repeats.
    pub fn as_key_press(&self) -> Option<&KeyEvent> {
        self.as_key().filter(|e| e.kind != KeyEventKind::Release)
    }
}

impl InputEvent {
    /// Mouse capture is never enabled, so mouse events have no counterpart.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(e) => Some(InputEvent::Key(e)),
            crossterm::event::Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
            crossterm::event::Event::Paste(s) => Some(InputEvent::Paste(s)),
            crossterm::event::Event::FocusGained => Some(InputEvent::FocusGained),
            crossterm::event::Event::FocusLost => Some(InputEvent::FocusLost),
            crossterm::event::Event::Mouse(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn char(ch: char) -> Self {
        Self::simple(KeyCode::Char(ch))
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let mut code = event.code;
        let mut modifiers = event.modifiers;

        if let KeyCode::Char(ch) = code {
            if ch.is_ascii_uppercase() {
                code = KeyCode::Char(ch.to_ascii_lowercase());
                modifiers |= KeyModifiers::SHIFT;
            }
        }
        if code == KeyCode::BackTab {
            modifiers |= KeyModifiers::SHIFT;
        }

        Self::new(code, modifiers)
    }
}

impl From<&KeyEvent> for Key {
    fn from(event: &KeyEvent) -> Self {
        Key::from(*event)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
