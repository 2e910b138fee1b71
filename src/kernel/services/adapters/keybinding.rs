//! Key bindings: key → command, resolved per context.

use crossterm::event::KeyCode;
use rustc_hash::FxHashMap;

use crate::core::event::Key;
use crate::core::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeybindingContext {
    Global,
    /// Version list and scenario sidebar.
    Navigation,
    /// A running scenario with focus outside the terminal.
    Scenario,
    Dialog,
    Success,
}

pub struct KeybindingService {
    global: FxHashMap<Key, Command>,
    navigation: FxHashMap<Key, Command>,
    scenario: FxHashMap<Key, Command>,
    dialog: FxHashMap<Key, Command>,
    success: FxHashMap<Key, Command>,
}

impl KeybindingService {
    pub fn new() -> Self {
        Self::with_defaults()
    }

    pub fn with_defaults() -> Self {
        let dialog = default_dialog_keybindings();
        let mut success = dialog.clone();
        success.extend(default_success_keybindings());
        Self {
            global: default_global_keybindings(),
            navigation: default_navigation_keybindings(),
            scenario: default_scenario_keybindings(),
            dialog,
            success,
        }
    }

    pub fn resolve(&self, context: KeybindingContext, key: &Key) -> Option<Command> {
        let found = match context {
            KeybindingContext::Global => self.global.get(key),
            KeybindingContext::Navigation => {
                self.navigation.get(key).or_else(|| self.global.get(key))
            }
            KeybindingContext::Scenario => self
                .scenario
                .get(key)
                .or_else(|| self.navigation.get(key))
                .or_else(|| self.global.get(key)),
            KeybindingContext::Dialog => self.dialog.get(key).or_else(|| self.global.get(key)),
            KeybindingContext::Success => self.success.get(key).or_else(|| self.global.get(key)),
        };
        found.copied()
    }
}

impl Default for KeybindingService {
    fn default() -> Self {
        Self::new()
    }
}

fn default_global_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.insert(Key::char('q'), Command::Quit);
    bindings.insert(Key::ctrl(KeyCode::Char('c')), Command::Quit);
    bindings.insert(Key::simple(KeyCode::Tab), Command::FocusNext);
    bindings.insert(Key::simple(KeyCode::Esc), Command::Back);
    bindings
}

fn default_navigation_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(12);

    bindings.insert(Key::simple(KeyCode::Up), Command::Up);
    bindings.insert(Key::char('k'), Command::Up);
    bindings.insert(Key::simple(KeyCode::Down), Command::Down);
    bindings.insert(Key::char('j'), Command::Down);
    bindings.insert(Key::simple(KeyCode::Left), Command::Left);
    bindings.insert(Key::char('h'), Command::Left);
    bindings.insert(Key::simple(KeyCode::Right), Command::Right);
    bindings.insert(Key::char('l'), Command::Right);
    bindings.insert(Key::char('g'), Command::Top);
    bindings.insert(Key::shift(KeyCode::Char('g')), Command::Bottom);
    bindings.insert(Key::simple(KeyCode::Enter), Command::Select);

    bindings
}

fn default_scenario_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.insert(Key::char('c'), Command::Check);
    bindings.insert(Key::char('h'), Command::ToggleHints);
    bindings.insert(Key::char('n'), Command::NextHint);
    bindings.insert(Key::char('p'), Command::PrevHint);
    bindings
}

fn default_dialog_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.reserve(16);

    for key in [
        Key::simple(KeyCode::Left),
        Key::char('h'),
        Key::shift(KeyCode::BackTab),
        Key::simple(KeyCode::Up),
        Key::char('k'),
    ] {
        bindings.insert(key, Command::PrevButton);
    }
    for key in [
        Key::simple(KeyCode::Right),
        Key::char('l'),
        Key::simple(KeyCode::Tab),
        Key::simple(KeyCode::Down),
        Key::char('j'),
    ] {
        bindings.insert(key, Command::NextButton);
    }
    bindings.insert(Key::simple(KeyCode::Enter), Command::Select);
    bindings.insert(Key::char('y'), Command::Confirm);
    bindings.insert(Key::char('n'), Command::Cancel);
    bindings.insert(Key::simple(KeyCode::Esc), Command::Cancel);

    bindings
}

fn default_success_keybindings() -> FxHashMap<Key, Command> {
    let mut bindings = FxHashMap::default();
    bindings.insert(Key::char('r'), Command::Retry);
    bindings.insert(Key::char('m'), Command::ReturnMenu);
    bindings
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/keybinding.rs"]
mod tests;
