//! Window-level shortcuts and action dispatch.

mod common;

use common::{test_config, test_window, test_window_with_config};
use marker::editor::{Editor, EditorEvent};
use marker::menu::{APP_MENU_ENTRIES, MenuAction};
use marker::window::{KeyPropagation, WindowRequest};
use winit::event::ElementState;
use marker_keybindings::{EventKey, KeybindingMatcher, Modifiers};
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;
use winit::keyboard::{KeyCode, NamedKey};

fn ctrl(ch: char, code: KeyCode) -> KeybindingMatcher {
    KeybindingMatcher::new(Modifiers::ctrl(), EventKey::Character(ch), Some(code))
}

fn f11() -> KeybindingMatcher {
    KeybindingMatcher::new(
        Modifiers::default(),
        EventKey::Named(NamedKey::F11),
        Some(KeyCode::F11),
    )
}

fn press(t: &mut common::TestWindow, matcher: &KeybindingMatcher) -> KeyPropagation {
    t.window.handle_key(matcher, ElementState::Pressed, false)
}

fn count_saves(t: &common::TestWindow) -> Rc<RefCell<usize>> {
    let saves = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&saves);
    t.window.with_editor(|e| {
        e.subscribe(move |event| {
            if matches!(event, EditorEvent::Saved(_)) {
                *sink.borrow_mut() += 1;
            }
        })
    });
    saves
}

#[test]
fn ctrl_s_saves_once_and_is_not_consumed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "old").unwrap();

    let mut t = test_window(Editor::from_file(&path).unwrap());
    let saves = count_saves(&t);
    t.window.with_editor(|e| e.set_text("new"));

    let propagation = press(&mut t, &ctrl('s', KeyCode::KeyS));

    assert_eq!(propagation, KeyPropagation::Continue);
    assert_eq!(*saves.borrow(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    assert_eq!(t.chooser.save_calls.get(), 0);
}

#[test]
fn ctrl_s_on_untitled_asks_for_a_path() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("fresh.md");

    let mut t = test_window(Editor::new());
    t.window.with_editor(|e| e.set_text("# draft"));
    t.chooser.answer_save(Some(target.clone()));

    press(&mut t, &ctrl('s', KeyCode::KeyS));

    assert_eq!(t.chooser.save_calls.get(), 1);
    assert_eq!(
        t.chooser.last_suggested_name.borrow().as_deref(),
        Some("Untitled.md")
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), "# draft");
    assert_eq!(
        t.window.shell().with_header_bar(|b| b.title().to_string()),
        Some("fresh.md".to_string())
    );
}

#[test]
fn cancelled_save_dialog_is_a_no_op() {
    let mut t = test_window(Editor::new());
    t.window.with_editor(|e| e.set_text("unsaved"));

    press(&mut t, &ctrl('s', KeyCode::KeyS));

    assert_eq!(t.window.with_editor(|e| e.is_modified()), Some(true));
    assert!(t.window.take_requests().is_empty());
}

#[test]
fn f11_toggles_fullscreen_once_per_press() {
    let mut t = test_window(Editor::new());

    assert_eq!(press(&mut t, &f11()), KeyPropagation::Continue);
    assert!(t.window.shell().is_fullscreen());
    assert_eq!(*t.display.requests.borrow(), [true]);

    press(&mut t, &f11());
    assert!(!t.window.shell().is_fullscreen());
    assert_eq!(*t.display.requests.borrow(), [true, false]);
}

#[test]
fn ctrl_o_requests_window_for_chosen_file() {
    let mut t = test_window(Editor::new());
    t.chooser.answer_open(Some("/tmp/readme.md".into()));

    let propagation = press(&mut t, &ctrl('o', KeyCode::KeyO));

    assert_eq!(propagation, KeyPropagation::Continue);
    assert_eq!(
        t.window.take_requests(),
        [WindowRequest::OpenWindow(Some("/tmp/readme.md".into()))]
    );
    assert!(t.window.take_requests().is_empty());
}

#[test]
fn cancelled_open_dialog_requests_nothing() {
    let mut t = test_window(Editor::new());
    press(&mut t, &ctrl('o', KeyCode::KeyO));
    assert_eq!(t.chooser.open_calls.get(), 1);
    assert!(t.window.take_requests().is_empty());
}

#[test]
fn ctrl_r_refreshes_preview() {
    let mut t = test_window(Editor::new());
    t.window.with_editor(|e| e.set_text("# Title\n\nbody"));
    assert_eq!(t.window.with_editor(|e| e.preview().len()), Some(0));

    press(&mut t, &ctrl('r', KeyCode::KeyR));
    assert_eq!(t.window.with_editor(|e| e.preview().len()), Some(2));
}

#[test]
fn unbound_keys_continue_without_effect() {
    let mut t = test_window(Editor::new());
    let shift_ctrl_s = KeybindingMatcher::new(
        Modifiers {
            ctrl: true,
            shift: true,
            ..Modifiers::default()
        },
        EventKey::Character('S'),
        Some(KeyCode::KeyS),
    );

    assert_eq!(press(&mut t, &shift_ctrl_s), KeyPropagation::Continue);
    assert_eq!(t.chooser.save_calls.get(), 0);
    assert!(!t.window.shell().is_fullscreen());
}

#[test]
fn fallback_app_menu_actions_are_registered() {
    let mut t = test_window(Editor::new());
    for (_, action) in APP_MENU_ENTRIES {
        assert!(t.window.actions().contains(action.id()));
    }

    assert!(t.window.activate("about"));
    assert!(t.window.overlays.about);
    assert!(t.window.activate("new_window"));
    assert!(t.window.activate("quit"));
    assert_eq!(
        t.window.take_requests(),
        [WindowRequest::OpenWindow(None), WindowRequest::Quit]
    );
    assert!(!t.window.activate("no_such_action"));
}

#[test]
fn close_window_action_queues_close() {
    let mut t = test_window(Editor::new());
    t.window.dispatch(MenuAction::CloseWindow);
    assert_eq!(t.window.take_requests(), [WindowRequest::Close]);
}

#[test]
fn start_fullscreen_from_config() {
    let config = test_config().with_fullscreen(true);
    let t = test_window_with_config(Editor::new(), &config);
    assert!(t.window.shell().is_fullscreen());
    assert_eq!(*t.display.requests.borrow(), [true]);
}

#[test]
fn shortcut_rows_list_default_bindings() {
    let t = test_window(Editor::new());
    let rows = t.window.shortcut_rows();
    assert_eq!(rows.len(), 4);
    assert!(rows.contains(&("F11".to_string(), "toggle_fullscreen")));
    assert!(rows.contains(&("Ctrl+S".to_string(), "save_file")));
}

#[test]
fn f11_repeat_and_release_do_not_toggle() {
    let mut t = test_window(Editor::new());

    press(&mut t, &f11());
    assert_eq!(
        t.window.handle_key(&f11(), ElementState::Pressed, true),
        KeyPropagation::Continue
    );
    assert_eq!(
        t.window.handle_key(&f11(), ElementState::Released, false),
        KeyPropagation::Continue
    );

    assert!(t.window.shell().is_fullscreen());
    assert_eq!(*t.display.requests.borrow(), [true]);
}

#[test]
fn ctrl_s_repeat_does_not_save_again() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.md");
    fs::write(&path, "old").unwrap();

    let mut t = test_window(Editor::from_file(&path).unwrap());
    let saves = count_saves(&t);
    press(&mut t, &ctrl('s', KeyCode::KeyS));
    t.window
        .handle_key(&ctrl('s', KeyCode::KeyS), ElementState::Pressed, true);

    assert_eq!(*saves.borrow(), 1);
}

#[test]
fn exit_fullscreen_action_is_ignored_when_windowed() {
    let mut t = test_window(Editor::new());

    press(&mut t, &f11());
    assert!(t.window.activate("exit_fullscreen"));
    assert!(!t.window.shell().is_fullscreen());

    // A second click in the same frame must not re-enter fullscreen
    assert!(t.window.activate("exit_fullscreen"));
    assert!(!t.window.shell().is_fullscreen());
    assert_eq!(*t.display.requests.borrow(), [true, false]);
}

#[test]
fn unreadable_requested_file_is_reported_in_subtitle() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("gone.md");
    let t = test_window(Editor::new());

    assert!(t.window.load_requested(&missing).is_none());

    let subtitle = t
        .window
        .shell()
        .with_header_bar(|b| b.subtitle().to_string())
        .unwrap();
    assert!(subtitle.starts_with("Error: "), "subtitle was {:?}", subtitle);
    assert!(subtitle.contains("gone.md"), "subtitle was {:?}", subtitle);
}

#[test]
fn readable_requested_file_loads_editor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "# Doc\n").unwrap();
    let t = test_window(Editor::new());

    let editor = t.window.load_requested(&path).unwrap();
    assert_eq!(editor.text(), "# Doc\n");
    assert_eq!(editor.path(), Some(path.as_path()));
    assert_eq!(
        t.window.shell().with_header_bar(|b| b.subtitle().to_string()),
        Some(String::new())
    );
}
