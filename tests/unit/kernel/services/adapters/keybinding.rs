use super::*;

#[test]
fn quit_is_global() {
    let service = KeybindingService::new();
    for context in [
        KeybindingContext::Global,
        KeybindingContext::Navigation,
        KeybindingContext::Scenario,
        KeybindingContext::Dialog,
        KeybindingContext::Success,
    ] {
        assert_eq!(service.resolve(context, &Key::char('q')), Some(Command::Quit));
        assert_eq!(
            service.resolve(context, &Key::ctrl(KeyCode::Char('c'))),
            Some(Command::Quit)
        );
    }
}

#[test]
fn vim_keys_navigate() {
    let service = KeybindingService::new();
    let nav = KeybindingContext::Navigation;
    assert_eq!(service.resolve(nav, &Key::char('j')), Some(Command::Down));
    assert_eq!(service.resolve(nav, &Key::char('k')), Some(Command::Up));
    assert_eq!(service.resolve(nav, &Key::char('h')), Some(Command::Left));
    assert_eq!(service.resolve(nav, &Key::char('l')), Some(Command::Right));
    assert_eq!(service.resolve(nav, &Key::char('g')), Some(Command::Top));
    assert_eq!(
        service.resolve(nav, &Key::shift(KeyCode::Char('g'))),
        Some(Command::Bottom)
    );
}

#[test]
fn scenario_shortcuts_shadow_navigation() {
    let service = KeybindingService::new();
    let ctx = KeybindingContext::Scenario;
    assert_eq!(service.resolve(ctx, &Key::char('h')), Some(Command::ToggleHints));
    assert_eq!(service.resolve(ctx, &Key::char('c')), Some(Command::Check));
    assert_eq!(service.resolve(ctx, &Key::char('j')), Some(Command::Down));
    assert_eq!(
        service.resolve(ctx, &Key::simple(KeyCode::Tab)),
        Some(Command::FocusNext)
    );
}

#[test]
fn dialog_tab_moves_between_buttons() {
    let service = KeybindingService::new();
    let ctx = KeybindingContext::Dialog;
    assert_eq!(
        service.resolve(ctx, &Key::simple(KeyCode::Tab)),
        Some(Command::NextButton)
    );
    assert_eq!(
        service.resolve(ctx, &Key::shift(KeyCode::BackTab)),
        Some(Command::PrevButton)
    );
    assert_eq!(service.resolve(ctx, &Key::char('y')), Some(Command::Confirm));
    assert_eq!(service.resolve(ctx, &Key::char('n')), Some(Command::Cancel));
    assert_eq!(
        service.resolve(ctx, &Key::simple(KeyCode::Esc)),
        Some(Command::Cancel)
    );
}

#[test]
fn success_adds_retry_and_menu() {
    let service = KeybindingService::new();
    let ctx = KeybindingContext::Success;
    assert_eq!(service.resolve(ctx, &Key::char('r')), Some(Command::Retry));
    assert_eq!(service.resolve(ctx, &Key::char('m')), Some(Command::ReturnMenu));
    assert_eq!(
        service.resolve(KeybindingContext::Dialog, &Key::char('r')),
        None
    );
}
