use analogwatch_core::headless::{HeadlessDisplay, Journal, JournalEntry};
use analogwatch_core::view::defines::{EMISSION_PRESS, EMISSION_RELEASE};
use analogwatch_core::{
    IconId, MessageId, MessagePayload, ViewController, ViewError, ViewPhase, ViewSetup,
    WallClockTime,
};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

const RES_DIR: &str = "/opt/usr/apps/org.example.analogwatch/res";

fn setup() -> ViewSetup {
    ViewSetup {
        title: "org.example.analogwatch".to_string(),
        resource_dir: Some(PathBuf::from(RES_DIR)),
    }
}

fn created_view() -> (Journal, ViewController<HeadlessDisplay>) {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone());
    let mut view = ViewController::new();
    view.create_view(&mut display, &setup(), 360, 360)
        .expect("view should be created");
    journal.clear();
    (journal, view)
}

fn recording_listener(view: &mut ViewController<HeadlessDisplay>) -> Rc<RefCell<Vec<IconId>>> {
    let taps = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&taps);
    view.register_icon_tap_callback(Box::new(move |icon| sink.borrow_mut().push(icon)));
    taps
}

#[test]
fn create_view_builds_window_layout_and_routes() {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone());
    let mut view = ViewController::new();

    view.create_view(&mut display, &setup(), 360, 360)
        .expect("view should be created");

    assert_eq!(view.phase(), ViewPhase::Created);
    assert_eq!(view.size(), (360, 360));
    let entries = journal.entries();
    match &entries[0] {
        JournalEntry::WindowCreated(options) => {
            assert_eq!(options.title, "org.example.analogwatch");
            assert_eq!((options.width, options.height), (360, 360));
        }
        other => panic!("unexpected first entry: {other:?}"),
    }
    match &entries[1] {
        JournalEntry::LayoutCreated(spec) => {
            assert_eq!(spec.file, PathBuf::from(RES_DIR).join("edje/main.edj"));
            assert_eq!(spec.group, "main");
            assert_eq!(spec.part, "default");
        }
        other => panic!("unexpected second entry: {other:?}"),
    }
    let routes = entries
        .iter()
        .filter(|entry| matches!(entry, JournalEntry::SignalRoute { .. }))
        .count();
    assert_eq!(routes, 4);
    assert_eq!(journal.count(&JournalEntry::WindowShown), 1);
}

#[test]
fn set_display_time_sends_one_unmodified_batch() {
    let (journal, mut view) = created_view();

    for (hour, minute, second) in [(0, 0, 0), (10, 9, 5), (23, 59, 59)] {
        journal.clear();
        let time = WallClockTime::new(hour, minute, second).expect("valid time");
        view.set_display_time(time);
        assert_eq!(
            journal.messages(),
            vec![(
                MessageId::SetTime,
                MessagePayload::IntSet(vec![hour as i32, minute as i32, second as i32])
            )]
        );
    }
}

#[test]
fn display_operations_before_create_send_nothing() {
    let mut view: ViewController<HeadlessDisplay> = ViewController::new();

    view.set_display_time(WallClockTime::new(10, 9, 5).unwrap());
    view.toggle_ambient_mode(true);
    view.set_badge(IconId::MissedCalls, 3);

    assert_eq!(view.phase(), ViewPhase::Uninitialized);
    assert_eq!(view.badge(IconId::MissedCalls), 0);
    assert!(!view.is_ambient());
}

#[test]
fn toggle_ambient_mode_sends_boolean_as_int() {
    let (journal, mut view) = created_view();

    view.toggle_ambient_mode(true);
    view.toggle_ambient_mode(false);

    assert_eq!(
        journal.messages(),
        vec![
            (MessageId::AmbientMode, MessagePayload::Int(1)),
            (MessageId::AmbientMode, MessagePayload::Int(0)),
        ]
    );
    assert!(!view.is_ambient());
}

#[test]
fn set_badge_passes_counts_through_on_icon_message_id() {
    let (journal, mut view) = created_view();

    view.set_badge(IconId::MissedCalls, 0);
    view.set_badge(IconId::UnreadMessages, -2);
    view.set_badge(IconId::MissedCalls, 7);

    assert_eq!(view.badge(IconId::MissedCalls), 7);
    assert_eq!(view.badge(IconId::UnreadMessages), -2);
    assert_eq!(
        journal.messages(),
        vec![
            (MessageId::SetBadgeMissedCalls, MessagePayload::Int(0)),
            (MessageId::SetBadgeUnreadMessages, MessagePayload::Int(-2)),
            (MessageId::SetBadgeMissedCalls, MessagePayload::Int(7)),
        ]
    );
}

#[test]
fn destroy_view_twice_releases_once() {
    let (journal, mut view) = created_view();

    view.destroy_view();
    view.destroy_view();

    assert_eq!(view.phase(), ViewPhase::Destroyed);
    assert_eq!(journal.count(&JournalEntry::WindowReleased), 1);
    assert_eq!(journal.count(&JournalEntry::LayoutReleased), 1);
}

#[test]
fn destroy_view_without_create_releases_nothing_and_ends_the_view() {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone());
    let mut view: ViewController<HeadlessDisplay> = ViewController::new();

    view.destroy_view();
    assert_eq!(view.phase(), ViewPhase::Destroyed);

    let err = view
        .create_view(&mut display, &setup(), 360, 360)
        .expect_err("destroyed is terminal");
    assert_eq!(err, ViewError::InvalidPhase(ViewPhase::Destroyed));
    assert!(journal.is_empty());
}

#[test]
fn destroy_view_drops_the_tap_listener() {
    let (_journal, mut view) = created_view();
    let taps = recording_listener(&mut view);
    assert!(view.has_icon_tap_callback());

    view.destroy_view();
    view.handle_signal(EMISSION_RELEASE, "missed_calls");

    assert!(!view.has_icon_tap_callback());
    assert!(taps.borrow().is_empty());
}

#[test]
fn press_emits_feedback_without_invoking_callback() {
    let (journal, mut view) = created_view();
    let taps = recording_listener(&mut view);

    view.handle_signal(EMISSION_PRESS, "missed_calls");

    assert_eq!(
        journal.signals(),
        vec![(
            "signal_missed_calls_press".to_string(),
            "missed_calls".to_string()
        )]
    );
    assert!(taps.borrow().is_empty());
}

#[test]
fn press_then_release_invokes_callback_once() {
    let (journal, mut view) = created_view();
    let taps = recording_listener(&mut view);

    view.handle_signal(EMISSION_PRESS, "unread_messages");
    view.handle_signal(EMISSION_RELEASE, "unread_messages");

    assert_eq!(
        journal.signals(),
        vec![
            (
                "signal_unread_messages_press".to_string(),
                "unread_messages".to_string()
            ),
            (
                "signal_unread_messages_unpress".to_string(),
                "unread_messages".to_string()
            ),
        ]
    );
    assert_eq!(*taps.borrow(), vec![IconId::UnreadMessages]);
}

#[test]
fn release_without_listener_still_emits_unpress() {
    let (journal, mut view) = created_view();
    assert!(!view.has_icon_tap_callback());

    view.handle_signal(EMISSION_RELEASE, "missed_calls");

    assert_eq!(journal.signals().len(), 1);
}

#[test]
fn newer_listener_replaces_older_one() {
    let (_journal, mut view) = created_view();
    let first = recording_listener(&mut view);
    let second = recording_listener(&mut view);

    view.handle_signal(EMISSION_RELEASE, "missed_calls");

    assert!(first.borrow().is_empty());
    assert_eq!(*second.borrow(), vec![IconId::MissedCalls]);
}

#[test]
fn unknown_parts_and_emissions_are_ignored() {
    let (journal, mut view) = created_view();
    let taps = recording_listener(&mut view);

    view.handle_signal(EMISSION_RELEASE, "hand_second");
    view.handle_signal("mouse,move", "missed_calls");

    assert!(journal.is_empty());
    assert!(taps.borrow().is_empty());
}

#[test]
fn window_failure_leaves_view_inert() {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone()).failing_window();
    let mut view = ViewController::new();

    let err = view
        .create_view(&mut display, &setup(), 360, 360)
        .expect_err("window creation should fail");
    assert!(matches!(err, ViewError::WindowUnavailable(_)));

    view.set_display_time(WallClockTime::new(1, 2, 3).unwrap());
    view.destroy_view();
    assert!(journal.is_empty());
    assert_eq!(view.phase(), ViewPhase::Destroyed);
}

#[test]
fn window_failure_then_destroy_rejects_later_create() {
    let journal = Journal::new();
    let mut failing = HeadlessDisplay::new(journal.clone()).failing_window();
    let mut working = HeadlessDisplay::new(journal.clone());
    let mut view = ViewController::new();

    view.create_view(&mut failing, &setup(), 360, 360)
        .expect_err("window creation should fail");
    view.destroy_view();

    let err = view
        .create_view(&mut working, &setup(), 360, 360)
        .expect_err("destroyed is terminal");
    assert_eq!(err, ViewError::InvalidPhase(ViewPhase::Destroyed));
    assert!(!view.is_created());
    assert!(journal.is_empty());
}

#[test]
fn layout_failure_keeps_window_for_release() {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone()).failing_layout();
    let mut view = ViewController::new();

    let err = view
        .create_view(&mut display, &setup(), 360, 360)
        .expect_err("layout creation should fail");
    assert!(matches!(err, ViewError::LayoutUnavailable(_)));
    assert_eq!(view.phase(), ViewPhase::Uninitialized);

    view.toggle_ambient_mode(true);
    assert!(journal.messages().is_empty());
    assert_eq!(journal.count(&JournalEntry::WindowShown), 0);

    view.destroy_view();
    assert_eq!(journal.count(&JournalEntry::WindowReleased), 1);
    assert_eq!(view.phase(), ViewPhase::Destroyed);
}

#[test]
fn missing_resource_dir_prevents_layout() {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone());
    let mut view = ViewController::new();
    let setup = ViewSetup {
        title: "org.example.analogwatch".to_string(),
        resource_dir: None,
    };

    let err = view
        .create_view(&mut display, &setup, 360, 360)
        .expect_err("resource path is required");
    assert_eq!(err, ViewError::ResourcePathUnavailable);
    assert!(!view.is_created());
}

#[test]
fn destroyed_view_cannot_be_recreated() {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone());
    let mut view = ViewController::new();
    view.create_view(&mut display, &setup(), 360, 360)
        .expect("view should be created");
    view.destroy_view();

    let err = view
        .create_view(&mut display, &setup(), 360, 360)
        .expect_err("destroyed is terminal");
    assert_eq!(err, ViewError::InvalidPhase(ViewPhase::Destroyed));
    assert_eq!(
        journal
            .entries()
            .iter()
            .filter(|entry| matches!(entry, JournalEntry::WindowCreated(_)))
            .count(),
        1
    );
}

#[test]
fn scenario_create_update_destroy() {
    let journal = Journal::new();
    let mut display = HeadlessDisplay::new(journal.clone());
    let mut view = ViewController::new();

    view.create_view(&mut display, &setup(), 360, 360)
        .expect("view should be created");
    journal.clear();

    view.set_display_time(WallClockTime::new(10, 9, 5).unwrap());
    view.toggle_ambient_mode(true);
    view.set_badge(IconId::MissedCalls, 3);
    assert_eq!(view.badge(IconId::MissedCalls), 3);

    view.destroy_view();
    view.set_display_time(WallClockTime::new(10, 9, 6).unwrap());

    assert_eq!(
        journal.messages(),
        vec![
            (MessageId::SetTime, MessagePayload::IntSet(vec![10, 9, 5])),
            (MessageId::AmbientMode, MessagePayload::Int(1)),
            (MessageId::SetBadgeMissedCalls, MessagePayload::Int(3)),
        ]
    );
    assert_eq!(journal.count(&JournalEntry::WindowReleased), 1);
}
