mod snapshot;

pub use snapshot::{ChipSnapshot, WidgetSnapshot, snapshot};

use app_api::UiApp;
use dom::{DomEvent, EventResponse, Id, Key};
use egui::{
    CentralPanel, Color32, Context, Event, Frame, Margin, RichText, Stroke, TextEdit,
    TopBottomPanel, Ui,
};
use emails_input::{
    EmailsInputError, INPUT_PLACEHOLDER, LogNotifier, Page, SEPARATOR_KEY, SettingsOverrides,
    WidgetHandle,
};

pub const MOUNT_ID: &str = "emails-input";

const VALID_FILL: Color32 = Color32::from_rgb(204, 226, 255);

/// A single page with one emails widget and the two demo actions.
pub struct DemoApp {
    page: Page,
    widget: WidgetHandle,
    next_guest: usize,
    count_popup: Option<usize>,
    last_error: Option<String>,
}

impl DemoApp {
    pub fn new(
        overrides: Option<&SettingsOverrides>,
        initial: &[String],
    ) -> Result<Self, EmailsInputError> {
        let mut page = Page::new();
        page.add_mount_point(MOUNT_ID)?;
        let widget = page.mount(MOUNT_ID, overrides, initial)?;
        log::info!(target: "demo", "mounted widget with {} initial email(s)", initial.len());
        Ok(Self {
            page,
            widget,
            next_guest: 1,
            count_popup: None,
            last_error: None,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn widget(&self) -> WidgetHandle {
        self.widget
    }

    /// "Add email": a fresh guest address each time.
    pub fn add_guest(&mut self) {
        let address = format!("guest{}@example.com", self.next_guest);
        self.next_guest += 1;
        let result = match self.page.widget_mut(self.widget) {
            Some(widget) => widget.add_email(&address).map(|_| ()),
            None => Ok(()),
        };
        self.record(result);
    }

    /// "Get emails count": opens the count popup and logs the count.
    pub fn request_count(&mut self) {
        let popup = &mut self.count_popup;
        if let Some(widget) = self.page.widget(self.widget) {
            widget.show_valid_emails_count(&mut |count: usize| *popup = Some(count));
            widget.show_valid_emails_count(&mut LogNotifier);
        }
    }

    pub fn dispatch(&mut self, event: DomEvent) -> EventResponse {
        match self.page.dispatch(&event) {
            Ok(response) => response,
            Err(err) => {
                self.record(Err(err));
                EventResponse::default()
            }
        }
    }

    fn record(&mut self, result: Result<(), EmailsInputError>) {
        if let Err(err) = result {
            log::warn!(target: "demo", "{err}");
            self.last_error = Some(err.to_string());
        }
    }

    /// Forward keyboard and clipboard input aimed at the focused text field,
    /// dropping the ones the widget handled.
    fn route_input_events(&mut self, ui: &mut Ui, input: Id) {
        let events = ui.input(|i| i.events.clone());
        for event in events {
            match event {
                Event::Paste(text) => {
                    if self.dispatch(DomEvent::paste(input, text)).default_prevented {
                        ui.input_mut(|i| i.events.retain(|e| !matches!(e, Event::Paste(_))));
                    }
                }
                Event::Text(text) if text.chars().eq([SEPARATOR_KEY]) => {
                    let key = Key::Character(SEPARATOR_KEY);
                    if self.dispatch(DomEvent::key_down(input, key)).default_prevented {
                        ui.input_mut(|i| {
                            i.events
                                .retain(|e| !matches!(e, Event::Text(t) if t.chars().eq([SEPARATOR_KEY])))
                        });
                    }
                }
                Event::Key {
                    key: egui::Key::Enter,
                    pressed: true,
                    ..
                } => {
                    self.dispatch(DomEvent::key_down(input, Key::Enter));
                }
                _ => {}
            }
        }
    }

    fn widget_ui(&mut self, ui: &mut Ui) {
        let Some(snap) = snapshot(&self.page, self.widget) else {
            ui.label("The widget has been removed.");
            return;
        };

        let edit_id = ui.make_persistent_id(("emails-input", snap.input));
        if ui.memory(|m| m.has_focus(edit_id)) {
            self.route_input_events(ui, snap.input);
        }
        // Routing may have committed the input; paint the result of it.
        let Some(snap) = snapshot(&self.page, self.widget) else {
            return;
        };

        let mut value = snap.value.clone();
        let mut clicked = Vec::new();
        let stroke = if snap.focused {
            ui.visuals().selection.stroke
        } else {
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color)
        };

        let response = Frame::group(ui.style())
            .stroke(stroke)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for chip in &snap.chips {
                        chip_ui(ui, chip, &mut clicked);
                    }
                    ui.add(
                        TextEdit::singleline(&mut value)
                            .id(edit_id)
                            .hint_text(INPUT_PLACEHOLDER)
                            .frame(false)
                            .desired_width(160.0),
                    )
                })
                .inner
            })
            .inner;

        if response.changed() {
            let synced = self
                .page
                .document()
                .borrow_mut()
                .set_value(snap.input, &value);
            self.record(synced.map_err(Into::into));
        }
        if response.gained_focus() {
            self.dispatch(DomEvent::focus(snap.input));
        }
        if response.lost_focus() {
            self.dispatch(DomEvent::blur(snap.input));
        }
        for icon in clicked {
            self.dispatch(DomEvent::click(icon));
        }
    }
}

fn chip_ui(ui: &mut Ui, chip: &ChipSnapshot, clicked: &mut Vec<Id>) {
    let (fill, label) = if chip.valid {
        (VALID_FILL, RichText::new(&chip.address))
    } else {
        (
            Color32::TRANSPARENT,
            RichText::new(&chip.address).color(Color32::RED).underline(),
        )
    };
    Frame::new()
        .fill(fill)
        .inner_margin(Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(label);
                if let Some(icon) = chip.delete_icon
                    && ui.small_button("×").clicked()
                {
                    clicked.push(icon);
                }
            });
        });
}

impl UiApp for DemoApp {
    fn title(&self) -> &str {
        "Emails input"
    }

    fn ui(&mut self, ctx: &Context) {
        TopBottomPanel::top("topbar").show(ctx, |ui| {
            ui.heading("Share Board name with others");
        });

        CentralPanel::default().show(ctx, |ui| {
            self.widget_ui(ui);
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Add email").clicked() {
                    self.add_guest();
                }
                if ui.button("Get emails count").clicked() {
                    self.request_count();
                }
            });
            if let Some(err) = &self.last_error {
                ui.colored_label(Color32::RED, err);
            }
        });

        if let Some(count) = self.count_popup {
            let mut open = true;
            egui::Window::new("Valid emails")
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(format!("{count} valid email(s)"));
                });
            if !open {
                self.count_popup = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_guest_and_count() {
        let mut app = DemoApp::new(None, &["a@b.com".to_string()]).unwrap();
        app.add_guest();
        app.add_guest();
        app.request_count();

        assert_eq!(app.count_popup, Some(3));
        let emails: Vec<&str> = app.page().widget(app.widget()).unwrap().emails().collect();
        assert_eq!(emails, ["a@b.com", "guest1@example.com", "guest2@example.com"]);
    }

    #[test]
    fn invalid_initial_emails_are_rejected() {
        let err = DemoApp::new(None, &["bad".to_string()]).err();
        assert!(matches!(err, Some(EmailsInputError::InvalidInitialEmails(_))));
    }

    #[test]
    fn dispatch_errors_are_recorded_not_raised() {
        let mut app = DemoApp::new(None, &[]).unwrap();
        let target = app.page().widget(app.widget()).unwrap().input();
        let response = app.dispatch(DomEvent::paste(target, "x@y.com,"));

        assert!(response.default_prevented);
        assert!(app.last_error.is_none());
        assert_eq!(app.page().widget(app.widget()).unwrap().valid_emails_count(), 1);
    }
}
