//! Keyboard shortcut handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Visualizer,
    Data,
    Predict,
}

impl View {
    pub const ALL: [View; 3] = [View::Visualizer, View::Data, View::Predict];

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Visualizer => Self::Data,
            Self::Data => Self::Predict,
            Self::Predict => Self::Visualizer,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Visualizer => "Visualizer",
            Self::Data => "Data Explorer",
            Self::Predict => "Predictor",
        }
    }
}

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    NextView,
    ShowView(View),
    /// Run, fetch or predict, depending on the view.
    Submit,
    TogglePlay,
    Stop,
    SpeedUp,
    SpeedDown,
    NextAlgorithm,
    PrevAlgorithm,
    NextDistribution,
    SizeUp,
    SizeDown,
    Compare,
    ToggleMember,
    CycleFilter,
    Refresh,
    Train,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    None,
}

/// Map a key event to an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab => KeyAction::NextView,
        KeyCode::Char('1') => KeyAction::ShowView(View::Visualizer),
        KeyCode::Char('2') => KeyAction::ShowView(View::Data),
        KeyCode::Char('3') => KeyAction::ShowView(View::Predict),
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Char(' ') => KeyAction::TogglePlay,
        KeyCode::Char('s') => KeyAction::Stop,
        KeyCode::Char('+' | '=') => KeyAction::SpeedUp,
        KeyCode::Char('-') => KeyAction::SpeedDown,
        KeyCode::Right | KeyCode::Char('l') => KeyAction::NextAlgorithm,
        KeyCode::Left | KeyCode::Char('h') => KeyAction::PrevAlgorithm,
        KeyCode::Char('d') => KeyAction::NextDistribution,
        KeyCode::Char(']') => KeyAction::SizeUp,
        KeyCode::Char('[') => KeyAction::SizeDown,
        KeyCode::Char('c') => KeyAction::Compare,
        KeyCode::Char('m') => KeyAction::ToggleMember,
        KeyCode::Char('f') => KeyAction::CycleFilter,
        KeyCode::Char('r') => KeyAction::Refresh,
        KeyCode::Char('t') => KeyAction::Train,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyAction {
        map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(key(KeyCode::Esc), KeyAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn plain_c_compares() {
        assert_eq!(key(KeyCode::Char('c')), KeyAction::Compare);
    }

    #[test]
    fn view_keys() {
        assert_eq!(key(KeyCode::Tab), KeyAction::NextView);
        assert_eq!(key(KeyCode::Char('2')), KeyAction::ShowView(View::Data));
        assert_eq!(View::Predict.next(), View::Visualizer);
    }

    #[test]
    fn playback_keys() {
        assert_eq!(key(KeyCode::Char(' ')), KeyAction::TogglePlay);
        assert_eq!(key(KeyCode::Char('+')), KeyAction::SpeedUp);
        assert_eq!(key(KeyCode::Char('=')), KeyAction::SpeedUp);
        assert_eq!(key(KeyCode::Char('-')), KeyAction::SpeedDown);
    }

    #[test]
    fn form_keys() {
        assert_eq!(key(KeyCode::Right), KeyAction::NextAlgorithm);
        assert_eq!(key(KeyCode::Char('h')), KeyAction::PrevAlgorithm);
        assert_eq!(key(KeyCode::Char(']')), KeyAction::SizeUp);
        assert_eq!(key(KeyCode::Char('[')), KeyAction::SizeDown);
        assert_eq!(key(KeyCode::Char('d')), KeyAction::NextDistribution);
    }

    #[test]
    fn unknown_key() {
        assert_eq!(key(KeyCode::Char('z')), KeyAction::None);
    }
}
