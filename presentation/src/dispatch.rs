//! UI-event → action dispatch.
//!
//! Every control of the terminal pages maps to an [`Action`] through
//! [`dispatch`]. Pages only interpret actions, so the wiring can be tested
//! without a terminal.

/// Interactive controls of the dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    ChatToggle,
    ChatClose,
    ChatSend,
    ChatInput,
    PrevPage,
    NextPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A control was activated.
    Click(Control),
    /// A key press, with the focused control if any.
    KeyPress { focus: Option<Control>, key: Key },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenChat,
    CloseChat,
    SubmitChat,
    PrevPage,
    NextPage,
    ReloadTable,
    Quit,
    None,
}

pub fn dispatch(event: &UiEvent) -> Action {
    match *event {
        UiEvent::Click(Control::ChatToggle) => Action::OpenChat,
        UiEvent::Click(Control::ChatClose) => Action::CloseChat,
        UiEvent::Click(Control::ChatSend) => Action::SubmitChat,
        UiEvent::Click(Control::PrevPage) => Action::PrevPage,
        UiEvent::Click(Control::NextPage) => Action::NextPage,
        UiEvent::Click(Control::ChatInput) => Action::None,
        // Keys typed into the chat input never trigger page shortcuts
        UiEvent::KeyPress {
            focus: Some(Control::ChatInput),
            key,
        } => match key {
            Key::Enter => Action::SubmitChat,
            _ => Action::None,
        },
        UiEvent::KeyPress { key, .. } => match key {
            Key::Char('p') => Action::PrevPage,
            Key::Char('n') => Action::NextPage,
            Key::Char('r') => Action::ReloadTable,
            Key::Char('q') => Action::Quit,
            _ => Action::None,
        },
    }
}

/// Parse a line typed at the pager prompt into an event.
///
/// Single-letter shortcuts become key presses; the longer words name the
/// buttons they stand for.
pub fn parse_command(line: &str) -> Option<UiEvent> {
    let event = match line.trim() {
        "" => return None,
        "prev" => UiEvent::Click(Control::PrevPage),
        "next" => UiEvent::Click(Control::NextPage),
        "c" | "chat" => UiEvent::Click(Control::ChatToggle),
        "close" => UiEvent::Click(Control::ChatClose),
        "reload" => UiEvent::KeyPress {
            focus: None,
            key: Key::Char('r'),
        },
        "quit" | "exit" => UiEvent::KeyPress {
            focus: None,
            key: Key::Char('q'),
        },
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => UiEvent::KeyPress {
                    focus: None,
                    key: Key::Char(c),
                },
                _ => UiEvent::KeyPress {
                    focus: None,
                    key: Key::Other,
                },
            }
        }
    };
    Some(event)
}

/// State of the floating chat window.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatWindow {
    open: bool,
    input: String,
}

impl ChatWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Apply an action to the window.
    ///
    /// Returns the question to send when the action submits a non-blank
    /// input. Submitting clears the input field.
    pub fn apply(&mut self, action: Action) -> Option<String> {
        match action {
            Action::OpenChat => {
                self.open = true;
                None
            }
            Action::CloseChat => {
                self.open = false;
                None
            }
            Action::SubmitChat => {
                let question = std::mem::take(&mut self.input);
                let trimmed = question.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(focus: Option<Control>, key: Key) -> UiEvent {
        UiEvent::KeyPress { focus, key }
    }

    #[test]
    fn test_buttons() {
        assert_eq!(dispatch(&UiEvent::Click(Control::ChatToggle)), Action::OpenChat);
        assert_eq!(dispatch(&UiEvent::Click(Control::ChatClose)), Action::CloseChat);
        assert_eq!(dispatch(&UiEvent::Click(Control::ChatSend)), Action::SubmitChat);
        assert_eq!(dispatch(&UiEvent::Click(Control::PrevPage)), Action::PrevPage);
        assert_eq!(dispatch(&UiEvent::Click(Control::NextPage)), Action::NextPage);
    }

    #[test]
    fn test_enter_in_chat_input_submits() {
        assert_eq!(
            dispatch(&key(Some(Control::ChatInput), Key::Enter)),
            Action::SubmitChat
        );
        assert_eq!(
            dispatch(&key(Some(Control::ChatInput), Key::Char('a'))),
            Action::None
        );
        // Shortcut letters are plain text inside the chat input
        assert_eq!(
            dispatch(&key(Some(Control::ChatInput), Key::Char('q'))),
            Action::None
        );
    }

    #[test]
    fn test_page_shortcuts() {
        assert_eq!(dispatch(&key(None, Key::Char('p'))), Action::PrevPage);
        assert_eq!(dispatch(&key(None, Key::Char('n'))), Action::NextPage);
        assert_eq!(dispatch(&key(None, Key::Char('r'))), Action::ReloadTable);
        assert_eq!(dispatch(&key(None, Key::Char('q'))), Action::Quit);
        assert_eq!(dispatch(&key(None, Key::Char('x'))), Action::None);
        assert_eq!(dispatch(&key(None, Key::Enter)), Action::None);
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command("n").map(|e| dispatch(&e)),
            Some(Action::NextPage)
        );
        assert_eq!(
            parse_command("prev").map(|e| dispatch(&e)),
            Some(Action::PrevPage)
        );
        assert_eq!(
            parse_command("chat").map(|e| dispatch(&e)),
            Some(Action::OpenChat)
        );
        assert_eq!(
            parse_command("exit").map(|e| dispatch(&e)),
            Some(Action::Quit)
        );
        assert_eq!(
            parse_command("hello").map(|e| dispatch(&e)),
            Some(Action::None)
        );
    }

    #[test]
    fn test_chat_window_submit() {
        let mut window = ChatWindow::new();
        assert_eq!(window.apply(Action::OpenChat), None);
        assert!(window.is_open());

        window.set_input("  potassium trend?  ");
        assert_eq!(
            window.apply(Action::SubmitChat),
            Some("potassium trend?".to_string())
        );
        assert_eq!(window.input(), "");

        window.set_input("   ");
        assert_eq!(window.apply(Action::SubmitChat), None);

        window.apply(Action::CloseChat);
        assert!(!window.is_open());
    }
}
