//! Read-only picture of a mounted widget, taken from the document each frame.

use dom::Id;
use emails_input::{Page, WidgetHandle};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChipSnapshot {
    pub chip: Id,
    pub address: String,
    pub valid: bool,
    pub delete_icon: Option<Id>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub container: Id,
    pub input: Id,
    pub focused: bool,
    pub value: String,
    pub chips: Vec<ChipSnapshot>,
}

/// `None` once the widget is disposed.
pub fn snapshot(page: &Page, handle: WidgetHandle) -> Option<WidgetSnapshot> {
    let widget = page.widget(handle).filter(|w| !w.is_disposed())?;
    let settings = widget.settings();
    let doc = page.document().borrow();

    let container = widget.container();
    let input = widget.input();
    let chips = doc
        .children(container)
        .iter()
        .copied()
        .filter(|&id| id != input)
        .map(|chip| ChipSnapshot {
            chip,
            address: doc.text_content(chip),
            valid: doc.has_class(chip, &settings.valid_block_class),
            delete_icon: doc
                .children(chip)
                .iter()
                .copied()
                .find(|&c| doc.has_class(c, &settings.delete_icon_class)),
        })
        .collect();

    Some(WidgetSnapshot {
        container,
        input,
        focused: doc.has_class(container, &settings.holder_focus_class),
        value: doc.value(input).unwrap_or_default().to_string(),
        chips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::DomEvent;

    #[test]
    fn snapshot_lists_chips_in_order() {
        let mut page = Page::new();
        page.add_mount_point("m").unwrap();
        let handle = page.mount("m", None, &["a@b.com"]).unwrap();
        page.widget_mut(handle).unwrap().add_email("oops").unwrap();

        let snap = snapshot(&page, handle).unwrap();
        let summary: Vec<(&str, bool)> = snap
            .chips
            .iter()
            .map(|c| (c.address.as_str(), c.valid))
            .collect();
        assert_eq!(summary, [("a@b.com", true), ("oops", false)]);
        assert!(snap.chips.iter().all(|c| c.delete_icon.is_some()));
        assert!(!snap.focused);
        assert!(snap.value.is_empty());
    }

    #[test]
    fn snapshot_follows_focus_and_disposal() {
        let mut page = Page::new();
        page.add_mount_point("m").unwrap();
        let handle = page.mount::<&str>("m", None, &[]).unwrap();
        let input = page.widget(handle).unwrap().input();

        page.dispatch(&DomEvent::focus(input)).unwrap();
        assert!(snapshot(&page, handle).unwrap().focused);

        page.dispose(handle).unwrap();
        assert!(snapshot(&page, handle).is_none());
    }
}
