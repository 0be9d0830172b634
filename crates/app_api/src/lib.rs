use egui::Context;

/// An application the platform host drives once per frame.
pub trait UiApp {
    fn title(&self) -> &str;
    fn ui(&mut self, ctx: &Context);
}
