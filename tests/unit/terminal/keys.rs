use super::*;
use crossterm::event::{KeyEventKind, KeyEventState};

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn bytes(code: KeyCode) -> Option<Vec<u8>> {
    bytes_for_key_event(&key(code, KeyModifiers::NONE))
}

#[test]
fn special_keys_follow_the_translation_table() {
    assert_eq!(bytes(KeyCode::Enter), Some(b"\r".to_vec()));
    assert_eq!(bytes(KeyCode::Backspace), Some(vec![0x7f]));
    assert_eq!(bytes(KeyCode::Up), Some(b"\x1b[A".to_vec()));
    assert_eq!(bytes(KeyCode::Down), Some(b"\x1b[B".to_vec()));
    assert_eq!(bytes(KeyCode::Right), Some(b"\x1b[C".to_vec()));
    assert_eq!(bytes(KeyCode::Left), Some(b"\x1b[D".to_vec()));
    assert_eq!(bytes(KeyCode::Home), Some(b"\x1b[H".to_vec()));
    assert_eq!(bytes(KeyCode::End), Some(b"\x1b[F".to_vec()));
    assert_eq!(bytes(KeyCode::Delete), Some(b"\x1b[3~".to_vec()));
    assert_eq!(bytes(KeyCode::PageUp), Some(b"\x1b[5~".to_vec()));
    assert_eq!(bytes(KeyCode::PageDown), Some(b"\x1b[6~".to_vec()));
    assert_eq!(bytes(KeyCode::Esc), Some(vec![0x1b]));
}

#[test]
fn control_keys_map_to_control_codes() {
    let ctrl = |ch| bytes_for_key_event(&key(KeyCode::Char(ch), KeyModifiers::CONTROL));
    assert_eq!(ctrl('c'), Some(vec![0x03]));
    assert_eq!(ctrl('d'), Some(vec![0x04]));
    assert_eq!(ctrl('z'), Some(vec![0x1a]));
    assert_eq!(ctrl('l'), Some(vec![0x0c]));
}

#[test]
fn tab_is_swallowed() {
    assert_eq!(bytes(KeyCode::Tab), None);
    assert_eq!(bytes(KeyCode::BackTab), None);
}

#[test]
fn printable_runes_are_forwarded_verbatim() {
    assert_eq!(bytes(KeyCode::Char('k')), Some(b"k".to_vec()));
    assert_eq!(bytes(KeyCode::Char(' ')), Some(b" ".to_vec()));
    assert_eq!(
        bytes_for_key_event(&key(KeyCode::Char('K'), KeyModifiers::SHIFT)),
        Some(b"K".to_vec())
    );
    assert_eq!(bytes(KeyCode::Char('é')), Some("é".as_bytes().to_vec()));
}

#[test]
fn function_keys_are_dropped() {
    assert_eq!(bytes(KeyCode::F(5)), None);
}

#[test]
fn paste_is_wrapped_in_bracketed_markers() {
    assert_eq!(
        bracketed_paste("kubectl get pods"),
        b"\x1b[200~kubectl get pods\x1b[201~".to_vec()
    );
}
