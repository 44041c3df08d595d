//! Editor commands and their keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// An action the canvas editor can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SelectAll,
    Duplicate,
    Delete,
    Undo,
    Redo,
    /// Drop the selection and close the side panel.
    Escape,
    ToggleTheme,
}

/// A keyboard shortcut bound to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format for display, e.g. "Ctrl+Shift+Z".
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.ctrl == ctrl && self.shift == shift && self.key.eq_ignore_ascii_case(key)
    }
}

/// All editor shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("A", true, false, Command::SelectAll, "Select all shapes"),
            Shortcut::new("D", true, false, Command::Duplicate, "Duplicate selection"),
            Shortcut::new("Delete", false, false, Command::Delete, "Delete selected shapes"),
            Shortcut::new("Backspace", false, false, Command::Delete, "Delete selected shapes"),
            Shortcut::new("Z", true, false, Command::Undo, "Undo"),
            Shortcut::new("Z", true, true, Command::Redo, "Redo"),
            Shortcut::new("Y", true, false, Command::Redo, "Redo"),
            Shortcut::new("Escape", false, false, Command::Escape, "Clear selection"),
            Shortcut::new("T", true, true, Command::ToggleTheme, "Toggle light/dark theme"),
        ]
    }

    /// Command bound to a key chord, if any.
    pub fn lookup(key: &str, ctrl: bool, shift: bool) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl, shift))
            .map(|s| s.command)
    }

    /// One help line per shortcut.
    pub fn help() -> Vec<String> {
        Self::all()
            .iter()
            .map(|s| format!("{:20} {}", s.format(), s.description))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup("d", true, false), Some(Command::Duplicate));
        assert_eq!(ShortcutRegistry::lookup("Z", true, true), Some(Command::Redo));
        assert_eq!(ShortcutRegistry::lookup("Z", true, false), Some(Command::Undo));
        assert_eq!(ShortcutRegistry::lookup("D", false, false), None);
    }

    #[test]
    fn test_format() {
        let redo = Shortcut::new("Z", true, true, Command::Redo, "Redo");
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
        assert_eq!(ShortcutRegistry::help().len(), ShortcutRegistry::all().len());
    }

    #[test]
    fn test_no_conflicting_chords() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(
                    !(a.matches(b.key, b.ctrl, b.shift)),
                    "{} bound twice",
                    a.format()
                );
            }
        }
    }
}
