use crate::application::ViewStateMachine;
use crate::domain::{Field, ViewState};
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    /// Run the asynchronous submission.
    Submit,
    Quit,
}

/// Focused form field and caret position, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCursor {
    pub focused: Field,
    pub position: usize,
}

impl Default for FormCursor {
    fn default() -> Self {
        Self {
            focused: Field::Like,
            position: 0,
        }
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        machine: &mut ViewStateMachine,
        cursor: &mut FormCursor,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Command {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return Command::Quit;
        }

        match machine.state() {
            ViewState::Input => Self::handle_input_mode(machine, cursor, key),
            ViewState::Result(_) => Self::handle_result_mode(machine, cursor, key),
            // Nothing may interrupt an outstanding request.
            ViewState::Analyzing => Command::None,
        }
    }

    fn handle_input_mode(machine: &mut ViewStateMachine, cursor: &mut FormCursor, key: KeyCode) -> Command {
        let value = machine.answers().get(cursor.focused).to_string();
        let length = value.chars().count();
        cursor.position = cursor.position.min(length);

        match key {
            KeyCode::Esc => return Command::Quit,
            KeyCode::Enter => {
                if cursor.focused.is_last() {
                    return Command::Submit;
                }
                Self::focus(machine, cursor, cursor.focused.next());
            }
            KeyCode::Tab | KeyCode::Down => {
                Self::focus(machine, cursor, cursor.focused.next());
            }
            KeyCode::BackTab | KeyCode::Up => {
                Self::focus(machine, cursor, cursor.focused.previous());
            }
            KeyCode::Backspace => {
                if cursor.position > 0 {
                    let edited = remove_char(&value, cursor.position - 1);
                    Self::write_field(machine, cursor.focused, edited);
                    cursor.position -= 1;
                }
            }
            KeyCode::Delete => {
                if cursor.position < length {
                    let edited = remove_char(&value, cursor.position);
                    Self::write_field(machine, cursor.focused, edited);
                }
            }
            KeyCode::Left => {
                if cursor.position > 0 {
                    cursor.position -= 1;
                }
            }
            KeyCode::Right => {
                if cursor.position < length {
                    cursor.position += 1;
                }
            }
            KeyCode::Home => {
                cursor.position = 0;
            }
            KeyCode::End => {
                cursor.position = length;
            }
            KeyCode::Char(c) => {
                let edited = insert_char(&value, cursor.position, c);
                Self::write_field(machine, cursor.focused, edited);
                cursor.position += 1;
            }
            _ => {}
        }
        Command::None
    }

    fn handle_result_mode(machine: &mut ViewStateMachine, cursor: &mut FormCursor, key: KeyCode) -> Command {
        match key {
            KeyCode::Enter | KeyCode::Char('r') => {
                if let Err(error) = machine.reset() {
                    debug!(%error, "reset ignored");
                }
                *cursor = FormCursor::default();
                Command::None
            }
            KeyCode::Esc | KeyCode::Char('q') => Command::Quit,
            _ => Command::None,
        }
    }

    fn focus(machine: &ViewStateMachine, cursor: &mut FormCursor, field: Field) {
        cursor.focused = field;
        cursor.position = machine.answers().get(field).chars().count();
    }

    fn write_field(machine: &mut ViewStateMachine, field: Field, value: String) {
        if let Err(error) = machine.update_field(field, value) {
            debug!(%error, "edit ignored");
        }
    }
}

fn byte_index(value: &str, position: usize) -> usize {
    value
        .char_indices()
        .nth(position)
        .map(|(index, _)| index)
        .unwrap_or(value.len())
}

fn insert_char(value: &str, position: usize, c: char) -> String {
    let mut edited = value.to_string();
    edited.insert(byte_index(value, position), c);
    edited
}

fn remove_char(value: &str, position: usize) -> String {
    let start = byte_index(value, position);
    let end = byte_index(value, position + 1);
    format!("{}{}", &value[..start], &value[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{fallback_recommendation, Answers, Recommendation, ScoringClient};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Offline;

    #[async_trait]
    impl ScoringClient for Offline {
        async fn fetch_recommendation(&self, _answers: &Answers) -> Recommendation {
            fallback_recommendation()
        }
    }

    fn machine() -> ViewStateMachine {
        ViewStateMachine::new(Arc::new(Offline))
    }

    fn press(machine: &mut ViewStateMachine, cursor: &mut FormCursor, key: KeyCode) -> Command {
        InputHandler::handle_key_event(machine, cursor, key, KeyModifiers::NONE)
    }

    fn type_text(machine: &mut ViewStateMachine, cursor: &mut FormCursor, text: &str) {
        for c in text.chars() {
            press(machine, cursor, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut machine = machine();
        let mut cursor = FormCursor::default();

        type_text(&mut machine, &mut cursor, "วาดรูป");

        assert_eq!(machine.answers().like, "วาดรูป");
        assert_eq!(cursor.position, "วาดรูป".chars().count());
    }

    #[test]
    fn test_editing_in_the_middle_of_thai_text() {
        let mut machine = machine();
        let mut cursor = FormCursor::default();
        type_text(&mut machine, &mut cursor, "คณิต");

        press(&mut machine, &mut cursor, KeyCode::Home);
        press(&mut machine, &mut cursor, KeyCode::Delete);
        assert_eq!(machine.answers().like, "ณิต");

        press(&mut machine, &mut cursor, KeyCode::End);
        press(&mut machine, &mut cursor, KeyCode::Left);
        press(&mut machine, &mut cursor, KeyCode::Backspace);
        assert_eq!(machine.answers().like, "ณต");

        press(&mut machine, &mut cursor, KeyCode::Char('x'));
        assert_eq!(machine.answers().like, "ณxต");
        assert_eq!(cursor.position, 2);
    }

    #[test]
    fn test_tab_and_backtab_move_focus() {
        let mut machine = machine();
        let mut cursor = FormCursor::default();

        type_text(&mut machine, &mut cursor, "a");
        press(&mut machine, &mut cursor, KeyCode::Tab);
        assert_eq!(cursor.focused, Field::Skill);
        assert_eq!(cursor.position, 0);

        type_text(&mut machine, &mut cursor, "b");
        press(&mut machine, &mut cursor, KeyCode::BackTab);
        assert_eq!(cursor.focused, Field::Like);
        assert_eq!(cursor.position, 1);

        press(&mut machine, &mut cursor, KeyCode::BackTab);
        assert_eq!(cursor.focused, Field::Hate);
        assert_eq!(machine.answers().skill, "b");
    }

    #[test]
    fn test_enter_advances_then_submits_on_last_field() {
        let mut machine = machine();
        let mut cursor = FormCursor::default();

        for expected in [Field::Skill, Field::Hobby, Field::Dream, Field::Hate] {
            assert_eq!(press(&mut machine, &mut cursor, KeyCode::Enter), Command::None);
            assert_eq!(cursor.focused, expected);
        }

        assert_eq!(press(&mut machine, &mut cursor, KeyCode::Enter), Command::Submit);
        assert!(matches!(machine.state(), ViewState::Input));
    }

    #[test]
    fn test_quit_keys() {
        let mut machine = machine();
        let mut cursor = FormCursor::default();

        assert_eq!(press(&mut machine, &mut cursor, KeyCode::Esc), Command::Quit);
        assert_eq!(
            InputHandler::handle_key_event(&mut machine, &mut cursor, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Command::Quit
        );
        // a plain 'q' is text while filling the form
        assert_eq!(press(&mut machine, &mut cursor, KeyCode::Char('q')), Command::None);
        assert_eq!(machine.answers().like, "q");
    }

    #[tokio::test]
    async fn test_result_mode_resets_and_ignores_typing() {
        let mut machine = machine();
        let mut cursor = FormCursor::default();
        type_text(&mut machine, &mut cursor, "เล่นเกม");
        machine.submit().await.unwrap();

        assert_eq!(press(&mut machine, &mut cursor, KeyCode::Char('x')), Command::None);
        assert!(matches!(machine.state(), ViewState::Result(_)));

        press(&mut machine, &mut cursor, KeyCode::Enter);

        assert!(matches!(machine.state(), ViewState::Input));
        assert_eq!(machine.answers(), &Answers::default());
        assert_eq!(cursor, FormCursor::default());
    }

    #[tokio::test]
    async fn test_result_mode_quit() {
        let mut machine = machine();
        let mut cursor = FormCursor::default();
        machine.submit().await.unwrap();

        assert_eq!(press(&mut machine, &mut cursor, KeyCode::Char('q')), Command::Quit);
    }

    #[test]
    fn test_char_helpers() {
        assert_eq!(insert_char("ab", 1, 'x'), "axb");
        assert_eq!(insert_char("ab", 5, 'x'), "abx");
        assert_eq!(remove_char("กขค", 1), "กค");
        assert_eq!(remove_char("กขค", 2), "กข");
    }
}
