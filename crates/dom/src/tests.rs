use super::*;

fn div_in_body(doc: &mut Document) -> Id {
    let div = doc.create_element("div");
    doc.append_child(doc.body(), div).expect("append div");
    div
}

#[test]
fn new_document_has_connected_body() {
    let doc = Document::new();
    assert_eq!(doc.parent(doc.body()), Some(doc.root()));
    assert!(doc.is_connected(doc.body()));
    assert_eq!(doc.tag_name(doc.body()), Some("body"));
    assert_ne!(doc.root(), Id::INVALID);
}

#[test]
fn insert_before_places_child_ahead_of_sibling() {
    let mut doc = Document::new();
    let parent = div_in_body(&mut doc);
    let input = doc.create_element("input");
    doc.append_child(parent, input).unwrap();

    let first = doc.create_element("span");
    let second = doc.create_element("span");
    doc.insert_before(parent, first, input).unwrap();
    doc.insert_before(parent, second, input).unwrap();

    assert_eq!(doc.children(parent), &[first, second, input]);
    assert_eq!(doc.parent(second), Some(parent));
}

#[test]
fn insert_before_rejects_foreign_sibling() {
    let mut doc = Document::new();
    let parent = div_in_body(&mut doc);
    let other = div_in_body(&mut doc);
    let child = doc.create_element("span");

    let err = doc.insert_before(parent, child, other).unwrap_err();
    assert_eq!(
        err,
        DomError::InvalidSibling {
            parent,
            before: other
        }
    );
    assert!(doc.parent(child).is_none());
}

#[test]
fn append_child_rejects_cycles_and_second_parent() {
    let mut doc = Document::new();
    let outer = div_in_body(&mut doc);
    let inner = doc.create_element("div");
    doc.append_child(outer, inner).unwrap();

    assert_eq!(
        doc.append_child(inner, outer),
        Err(DomError::CycleDetected {
            parent: inner,
            child: outer
        })
    );
    let other = div_in_body(&mut doc);
    assert_eq!(doc.append_child(other, inner), Err(DomError::InvalidParent(inner)));
}

#[test]
fn text_nodes_cannot_take_children() {
    let mut doc = Document::new();
    let text = doc.create_text("hello");
    let span = doc.create_element("span");
    assert_eq!(doc.append_child(text, span), Err(DomError::InvalidParent(text)));
}

#[test]
fn remove_drops_subtree_and_its_listeners() {
    let mut doc = Document::new();
    let container = div_in_body(&mut doc);
    let chip = doc.create_element("span");
    let label = doc.create_text("a@b.com");
    doc.append_child(container, chip).unwrap();
    doc.append_child(chip, label).unwrap();
    doc.add_event_listener(container, EventKind::Click, false)
        .unwrap();
    doc.add_event_listener(chip, EventKind::Click, false).unwrap();

    let dropped = doc.remove(container).unwrap();

    assert_eq!(dropped, 2);
    assert_eq!(doc.listener_count(), 0);
    assert!(!doc.contains(container));
    assert!(!doc.contains(chip));
    assert!(!doc.contains(label));
    assert!(doc.children(doc.body()).is_empty());
    assert_eq!(doc.remove(chip), Err(DomError::UnknownNode(chip)));
}

#[test]
fn removed_nodes_are_freed_and_ids_not_reused() {
    let mut doc = Document::new();
    let container = div_in_body(&mut doc);
    let baseline = doc.node_count();

    let mut last = Id::INVALID;
    for _ in 0..1000 {
        let chip = doc.create_element("span");
        let label = doc.create_text("a@b.com");
        doc.append_child(container, chip).unwrap();
        doc.append_child(chip, label).unwrap();
        assert!(chip > last);
        last = label;
        doc.remove(chip).unwrap();
    }

    assert_eq!(doc.node_count(), baseline);
    assert!(doc.children(container).is_empty());
}

#[test]
fn class_list_add_and_remove() {
    let mut doc = Document::new();
    let div = div_in_body(&mut doc);

    doc.add_class(div, "emails-input-field").unwrap();
    doc.add_class(div, "__emailHolderFocus").unwrap();
    doc.add_class(div, "__emailHolderFocus").unwrap();
    assert_eq!(
        doc.attribute(div, "class"),
        Some("emails-input-field __emailHolderFocus")
    );

    doc.remove_class(div, "__emailHolderFocus").unwrap();
    assert!(doc.has_class(div, "emails-input-field"));
    assert!(!doc.has_class(div, "__emailHolderFocus"));

    let text = doc.create_text("x");
    assert_eq!(doc.add_class(text, "a"), Err(DomError::WrongNodeKind(text)));
}

#[test]
fn attributes_are_case_insensitive_by_name() {
    let mut doc = Document::new();
    let input = doc.create_element("INPUT");
    doc.set_attribute(input, "Type", "email").unwrap();
    doc.set_attribute(input, "type", "text").unwrap();

    assert_eq!(doc.tag_name(input), Some("input"));
    assert_eq!(doc.attribute(input, "TYPE"), Some("text"));
    assert!(doc.remove_attribute(input, "type").unwrap());
    assert_eq!(doc.attribute(input, "type"), None);
}

#[test]
fn value_is_separate_from_attribute() {
    let mut doc = Document::new();
    let input = doc.create_element("input");
    doc.set_value(input, "a@b.com").unwrap();

    assert_eq!(doc.value(input), Some("a@b.com"));
    assert_eq!(doc.attribute(input, "value"), None);
}

#[test]
fn text_content_concatenates_in_tree_order() {
    let mut doc = Document::new();
    let span = div_in_body(&mut doc);
    let a = doc.create_text("a@");
    let inner = doc.create_element("b");
    let b = doc.create_text("b.com");
    doc.append_child(span, a).unwrap();
    doc.append_child(span, inner).unwrap();
    doc.append_child(inner, b).unwrap();

    assert_eq!(doc.text_content(span), "a@b.com");
}

#[test]
fn get_element_by_id_finds_only_connected_elements() {
    let mut doc = Document::new();
    let mount = div_in_body(&mut doc);
    doc.set_attribute(mount, "id", "emails-input").unwrap();
    let detached = doc.create_element("div");
    doc.set_attribute(detached, "id", "detached").unwrap();

    assert_eq!(doc.get_element_by_id("emails-input"), Some(mount));
    assert_eq!(doc.get_element_by_id("detached"), None);
    assert_eq!(doc.get_element_by_id(""), None);
}

#[test]
fn propagation_runs_capture_target_then_bubble() {
    let mut doc = Document::new();
    let container = div_in_body(&mut doc);
    let input = doc.create_element("input");
    doc.append_child(container, input).unwrap();

    let body_bubble = doc
        .add_event_listener(doc.body(), EventKind::Click, false)
        .unwrap();
    let container_bubble = doc
        .add_event_listener(container, EventKind::Click, false)
        .unwrap();
    let container_capture = doc
        .add_event_listener(container, EventKind::Click, true)
        .unwrap();
    let at_target = doc.add_event_listener(input, EventKind::Click, true).unwrap();

    assert_eq!(
        doc.propagation_path(input, EventKind::Click),
        vec![container_capture, at_target, container_bubble, body_bubble]
    );
}

#[test]
fn non_bubbling_events_reach_only_capture_listeners_on_ancestors() {
    let mut doc = Document::new();
    let container = div_in_body(&mut doc);
    let input = doc.create_element("input");
    doc.append_child(container, input).unwrap();

    let capture = doc.add_event_listener(container, EventKind::Blur, true).unwrap();
    doc.add_event_listener(container, EventKind::Blur, false)
        .unwrap();

    assert_eq!(doc.propagation_path(input, EventKind::Blur), vec![capture]);
    // On the container itself both listeners are at-target.
    assert_eq!(doc.propagation_path(container, EventKind::Blur).len(), 2);
}

#[test]
fn removed_listener_is_not_reached() {
    let mut doc = Document::new();
    let container = div_in_body(&mut doc);
    let listener = doc
        .add_event_listener(container, EventKind::Paste, false)
        .unwrap();

    assert!(doc.remove_event_listener(listener));
    assert!(!doc.remove_event_listener(listener));
    assert!(doc.propagation_path(container, EventKind::Paste).is_empty());
}
