//! End-to-end editing sequences: registry → overlay → editor → document

use std::time::{Duration, Instant};

use serde_json::json;
use stanza_editor::{
    BoundsSource, EditorSession, ElementKind, ElementRegistration, PageContent, Point,
    PointerOutcome, Rect, UpdateDispatcher,
};

fn demo_document() -> PageContent {
    PageContent::from_value(json!({
        "title": "Home",
        "subtitle": "Welcome",
        "sections": {
            "hero": {
                "type": "hero",
                "data": { "title": "Hello", "features": ["Fast", "Reliable"] },
                "order": 1
            }
        }
    }))
    .unwrap()
}

fn demo_session() -> EditorSession {
    let mut session = EditorSession::new(demo_document());
    session.registry_mut().register(ElementRegistration::new(
        "hero",
        "data.title",
        ElementKind::Text,
        Rect::new(0.0, 0.0, 100.0, 20.0),
    ));
    session.registry_mut().register(ElementRegistration::new(
        "hero",
        "data.tagline",
        ElementKind::RichText,
        Rect::new(0.0, 30.0, 100.0, 20.0),
    ));
    session
}

#[test]
fn test_single_active_element_across_reactivation() {
    let mut session = demo_session();

    let first = session.pointer_down(Point::new(10.0, 10.0));
    assert!(matches!(first, PointerOutcome::Activated { .. }));
    assert_eq!(session.focus().active_id(), Some("hero:data.title"));

    // Activate B while A is active: exactly one active id afterwards.
    let second = session.pointer_down(Point::new(10.0, 40.0));
    assert!(matches!(second, PointerOutcome::Activated { .. }));
    assert_eq!(session.focus().active_id(), Some("hero:data.tagline"));
    assert_eq!(
        session.active_editor().unwrap().element_id(),
        "hero:data.tagline"
    );
}

#[test]
fn test_reregistration_keeps_one_record() {
    let mut session = demo_session();
    let before = session.registry().len();

    session.registry_mut().register(ElementRegistration::new(
        "hero",
        "data.title",
        ElementKind::Text,
        Rect::new(5.0, 5.0, 120.0, 24.0),
    ));

    assert_eq!(session.registry().len(), before);
    assert_eq!(
        session.registry().get("hero:data.title").unwrap().bounds,
        Rect::new(5.0, 5.0, 120.0, 24.0)
    );
}

#[test]
fn test_click_edit_commit_updates_document() {
    let mut session = demo_session();

    session.pointer_down(Point::new(10.0, 10.0));
    assert_eq!(session.active_editor().unwrap().buffer(), "Hello");

    session.input("Hello again").unwrap();
    let changed = session.commit_active().unwrap();

    assert!(changed);
    assert!(session.active_editor().is_none());
    assert_eq!(session.focus().active_id(), None);
    assert_eq!(
        session.document().section_data("hero").unwrap()["title"],
        json!("Hello again")
    );
}

#[test]
fn test_outside_press_discards_buffer() {
    let mut session = demo_session();
    session.pointer_down(Point::new(10.0, 10.0));
    session.input("never saved").unwrap();

    let outcome = session.pointer_down(Point::new(500.0, 500.0));
    assert_eq!(outcome, PointerOutcome::DismissedActive);
    assert_eq!(
        session.document().section_data("hero").unwrap()["title"],
        json!("Hello")
    );
}

#[test]
fn test_dispatched_feature_icon_update_migrates_array() {
    let doc = demo_document();
    let mut result = None;

    let changed = UpdateDispatcher::new(|next| result = Some(next))
        .commit_feature(&doc, "hero", 0, "icon", "Bolt");
    assert!(changed);

    let next = result.expect("apply callback fired");
    assert_eq!(
        next.section_data("hero").unwrap()["features"],
        json!([
            { "id": "feature-0", "icon": "Bolt", "text": "Fast", "title": "Fast" },
            { "id": "feature-1", "icon": "Check", "text": "Reliable", "title": "Reliable" }
        ])
    );
}

#[test]
fn test_reserved_title_commit_routes_to_top_level() {
    let mut session = EditorSession::new(demo_document());
    session.registry_mut().register(ElementRegistration::new(
        "hero",
        "title",
        ElementKind::Text,
        Rect::new(0.0, 0.0, 100.0, 20.0),
    ));

    session.pointer_down(Point::new(10.0, 10.0));
    // Seeded from the document's top-level title, not the hero section.
    assert_eq!(session.active_editor().unwrap().buffer(), "Home");

    session.input("Homepage").unwrap();
    session.commit_active().unwrap();

    assert_eq!(session.document().title(), Some("Homepage"));
    // The hero section was not touched.
    assert_eq!(
        session.document().section_data("hero").unwrap()["title"],
        json!("Hello")
    );
}

struct ShiftedBounds(f64);

impl BoundsSource for ShiftedBounds {
    fn bounds_of(&self, id: &str) -> Option<Rect> {
        match id {
            "hero:data.title" => Some(Rect::new(self.0, 0.0, 100.0, 20.0)),
            "hero:data.tagline" => Some(Rect::new(self.0, 30.0, 100.0, 20.0)),
            _ => None,
        }
    }
}

#[test]
fn test_layout_notifications_are_debounced() {
    let mut session = demo_session();
    let start = Instant::now();

    // First notification runs and moves both rects.
    assert_eq!(
        session.notify_layout_changed(&ShiftedBounds(10.0), start),
        Some(2)
    );

    // A burst within the frame window is swallowed.
    assert_eq!(
        session.notify_layout_changed(&ShiftedBounds(20.0), start + Duration::from_millis(4)),
        None
    );

    // After the window, a refresh against unchanged bounds is a no-op.
    assert_eq!(
        session.notify_layout_changed(&ShiftedBounds(10.0), start + Duration::from_millis(32)),
        Some(0)
    );
}

#[test]
fn test_indicators_follow_refreshed_bounds() {
    let mut session = demo_session();
    session.overlay_mut().set_container_origin(Point::new(0.0, 0.0));

    let start = Instant::now();
    session.notify_layout_changed(&ShiftedBounds(40.0), start);

    let indicators = session.indicators();
    let title = indicators
        .iter()
        .find(|indicator| indicator.id == "hero:data.title")
        .unwrap();
    assert_eq!(title.rect, Rect::new(40.0, 0.0, 100.0, 20.0));
}
