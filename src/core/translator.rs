use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{
    app::{InputMode, View},
    message::{AppMsg, SystemMsg, UiMsg},
};

/// Translate a key press into a message for the current input mode
///
/// Pure: it looks only at the key and the mode.
pub fn translate_key(key: KeyEvent, mode: InputMode) -> Option<AppMsg> {
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        return Some(AppMsg::System(SystemMsg::Quit));
    }

    match mode {
        InputMode::Normal if key.code == KeyCode::Char('q') && key.modifiers.is_empty() => {
            Some(AppMsg::System(SystemMsg::Quit))
        }
        InputMode::Normal => translate_normal_mode_key(key).map(AppMsg::Ui),
        InputMode::Composing | InputMode::Editing => {
            translate_input_mode_key(key, mode).map(AppMsg::Ui)
        }
    }
}

fn translate_input_mode_key(key: KeyEvent, mode: InputMode) -> Option<UiMsg> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(UiMsg::InputCanceled),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(UiMsg::InputSubmitted),
        (KeyCode::Tab, _) if mode == InputMode::Editing => Some(UiMsg::FieldToggled),
        _ => Some(UiMsg::TextInput(key)),
    }
}

fn translate_normal_mode_key(key: KeyEvent) -> Option<UiMsg> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    let msg = match key.code {
        KeyCode::Char('1') => UiMsg::ViewSelected(View::Home),
        KeyCode::Char('2') => UiMsg::ViewSelected(View::Users),
        KeyCode::Char('3') => UiMsg::ViewSelected(View::Profile),
        KeyCode::Char('j') | KeyCode::Down => UiMsg::NextItemSelected,
        KeyCode::Char('k') | KeyCode::Up => UiMsg::PreviousItemSelected,
        KeyCode::Char('n') => UiMsg::NewerRequested,
        KeyCode::Char('m') => UiMsg::OlderRequested,
        KeyCode::Char(']') | KeyCode::Right => UiMsg::NextPageRequested,
        KeyCode::Char('[') | KeyCode::Left => UiMsg::PreviousPageRequested,
        KeyCode::Enter => UiMsg::SelectedUserOpened,
        KeyCode::Char('i') => UiMsg::ComposingStarted,
        KeyCode::Char('e') => UiMsg::EditingStarted,
        KeyCode::Char('L') => UiMsg::LogoutRequested,
        KeyCode::Char('r') => UiMsg::ReloadRequested,
        _ => return None,
    };
    Some(msg)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case(KeyCode::Char('1'), Some(UiMsg::ViewSelected(View::Home)))]
    #[case(KeyCode::Char('2'), Some(UiMsg::ViewSelected(View::Users)))]
    #[case(KeyCode::Char('3'), Some(UiMsg::ViewSelected(View::Profile)))]
    #[case(KeyCode::Char('j'), Some(UiMsg::NextItemSelected))]
    #[case(KeyCode::Char('k'), Some(UiMsg::PreviousItemSelected))]
    #[case(KeyCode::Char('n'), Some(UiMsg::NewerRequested))]
    #[case(KeyCode::Char('m'), Some(UiMsg::OlderRequested))]
    #[case(KeyCode::Char(']'), Some(UiMsg::NextPageRequested))]
    #[case(KeyCode::Char('['), Some(UiMsg::PreviousPageRequested))]
    #[case(KeyCode::Enter, Some(UiMsg::SelectedUserOpened))]
    #[case(KeyCode::Char('i'), Some(UiMsg::ComposingStarted))]
    #[case(KeyCode::Char('e'), Some(UiMsg::EditingStarted))]
    #[case(KeyCode::Char('L'), Some(UiMsg::LogoutRequested))]
    #[case(KeyCode::Char('r'), Some(UiMsg::ReloadRequested))]
    #[case(KeyCode::Char('x'), None)]
    fn test_normal_mode(#[case] code: KeyCode, #[case] expected: Option<UiMsg>) {
        assert_eq!(
            translate_key(key(code), InputMode::Normal),
            expected.map(AppMsg::Ui)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            translate_key(key(KeyCode::Char('q')), InputMode::Normal),
            Some(AppMsg::System(SystemMsg::Quit))
        );
        assert_eq!(
            translate_key(key(KeyCode::Char('q')), InputMode::Composing),
            Some(AppMsg::Ui(UiMsg::TextInput(key(KeyCode::Char('q')))))
        );
        assert_eq!(
            translate_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                InputMode::Composing
            ),
            Some(AppMsg::System(SystemMsg::Quit))
        );
    }

    #[rstest]
    #[case(InputMode::Composing)]
    #[case(InputMode::Editing)]
    fn test_input_mode(#[case] mode: InputMode) {
        assert_eq!(
            translate_key(key(KeyCode::Esc), mode),
            Some(AppMsg::Ui(UiMsg::InputCanceled))
        );
        assert_eq!(
            translate_key(
                KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
                mode
            ),
            Some(AppMsg::Ui(UiMsg::InputSubmitted))
        );
        // Navigation keys are plain text while typing
        assert_eq!(
            translate_key(key(KeyCode::Char('j')), mode),
            Some(AppMsg::Ui(UiMsg::TextInput(key(KeyCode::Char('j')))))
        );
    }

    #[test]
    fn test_tab_toggles_only_when_editing() {
        assert_eq!(
            translate_key(key(KeyCode::Tab), InputMode::Editing),
            Some(AppMsg::Ui(UiMsg::FieldToggled))
        );
        assert_eq!(
            translate_key(key(KeyCode::Tab), InputMode::Composing),
            Some(AppMsg::Ui(UiMsg::TextInput(key(KeyCode::Tab))))
        );
    }
}
