use super::*;

#[test]
fn test_command_names() {
    assert_eq!(Command::Quit.name(), "quit");
    assert_eq!(Command::ToggleHints.name(), "toggleHints");
    assert_eq!(Command::ReturnMenu.name(), "returnMenu");
}

#[test]
fn test_is_navigation() {
    assert!(Command::Up.is_navigation());
    assert!(Command::Select.is_navigation());
    assert!(!Command::Check.is_navigation());
    assert!(!Command::Quit.is_navigation());
}
