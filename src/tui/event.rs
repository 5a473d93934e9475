use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events.
///
/// The keyboard contract for the prompt editor: plain Enter inserts a
/// newline (multi-line drafts), Ctrl+Enter submits. Ctrl+J is accepted as a
/// submit fallback because most terminals without the Kitty keyboard
/// protocol deliver Ctrl+Enter as a bare LF.
pub enum TuiEvent {
    /// Ctrl+C — quit regardless of mode.
    ForceQuit,
    /// Esc — dismiss the active overlay.
    Escape,
    /// Ctrl+Enter (or Ctrl+J) — submit the draft.
    Submit,

    // Editing
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // Message list scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // End key with Ctrl - re-enables stick-to-bottom

    // Shell chords
    OpenModelPicker,    // Ctrl+M
    OpenTemplatePicker, // Ctrl+T
    OpenParamPanel,     // Ctrl+P
    NewConversation,    // Ctrl+N
    ToggleTheme,        // Ctrl+G

    Resize,
}

/// Poll for an event without blocking (returns immediately).
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key) => {
            // With REPORT_EVENT_TYPES enabled, terminals also send key
            // releases; only act on presses and repeats.
            if key.kind == KeyEventKind::Release {
                return None;
            }
            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                // Submit chord. Plain Enter stays a newline below.
                (KeyModifiers::CONTROL, KeyCode::Enter) => Some(TuiEvent::Submit),
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::Submit),
                (KeyModifiers::CONTROL, KeyCode::Char('m')) => Some(TuiEvent::OpenModelPicker),
                (KeyModifiers::CONTROL, KeyCode::Char('t')) => Some(TuiEvent::OpenTemplatePicker),
                (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::OpenParamPanel),
                (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(TuiEvent::NewConversation),
                (KeyModifiers::CONTROL, KeyCode::Char('g')) => Some(TuiEvent::ToggleTheme),
                (KeyModifiers::CONTROL, KeyCode::End) => Some(TuiEvent::ScrollToBottom),
                (_, KeyCode::Enter) => Some(TuiEvent::InputChar('\n')),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
                (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                _ => None,
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
