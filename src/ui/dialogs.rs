use chrono::NaiveDate;
use egui::{Color32, Context, Pos2, Rect, RichText, Window};

use crate::model::{DialogMode, TaskCategory, TaskDialog};
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Submit,
    Cancel,
    Delete,
}

/// Pointer events around the dialog window for one frame.
#[derive(Debug, Clone, Copy)]
struct Dismissal {
    /// False once the title-bar close button was clicked.
    open: bool,
    dismissable: bool,
    popup_open: bool,
    window: Option<Rect>,
    press: Option<Pos2>,
}

impl Dismissal {
    /// Final action after the window's own buttons reported `action`.
    fn resolve(&self, action: DialogAction) -> DialogAction {
        if !self.open {
            return DialogAction::Cancel;
        }
        if action != DialogAction::None || !self.dismissable || self.popup_open {
            return action;
        }
        match (self.window, self.press) {
            (Some(window), Some(press)) if !window.contains(press) => DialogAction::Cancel,
            _ => action,
        }
    }
}

/// Render the create/edit task dialog. `range` is the day span the task
/// covers (or will cover), shown read-only.
///
/// When `dismissable`, a primary press outside the window cancels it. The
/// caller clears it on the frame the dialog opens, whose press started the
/// selection.
pub fn show_task_dialog(
    dialog: &mut TaskDialog,
    range: (NaiveDate, NaiveDate),
    dismissable: bool,
    ctx: &Context,
) -> DialogAction {
    let mut action = DialogAction::None;
    let mut open = true;
    // Combo box lists draw outside the window.
    let popup_open = ctx.memory(|m| m.any_popup_open());
    let shown = Window::new(RichText::new(dialog.title()).strong().size(14.0))
        .id(egui::Id::new("task_dialog"))
        .open(&mut open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("task_dialog_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    let name = ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut dialog.name)
                            .hint_text("Task name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    if !name.has_focus() && !ui.ctx().memory(|m| m.focused().is_some()) {
                        name.request_focus();
                    }
                    if name.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        action = DialogAction::Submit;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Category").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("task_dialog_category")
                        .selected_text(dialog.category.label())
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for category in TaskCategory::all() {
                                ui.selectable_value(&mut dialog.category, *category, category.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Dates").color(theme::TEXT_SECONDARY));
                    let (start, end) = range;
                    let text = if start == end {
                        start.format("%a %d %b %Y").to_string()
                    } else {
                        format!("{} → {}", start.format("%a %d %b"), end.format("%a %d %b %Y"))
                    };
                    ui.label(RichText::new(text).color(theme::TEXT_PRIMARY));
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let submit = egui::Button::new(RichText::new(dialog.submit_label()).color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                let enabled = !dialog.name.trim().is_empty();
                if ui.add_enabled(enabled, submit).clicked() {
                    action = DialogAction::Submit;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    action = DialogAction::Cancel;
                }
                if matches!(dialog.mode, DialogMode::Edit { .. }) {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                            .fill(theme::DANGER);
                        if ui.add(delete).clicked() {
                            action = DialogAction::Delete;
                        }
                    });
                }
            });
            ui.add_space(2.0);
        });

    Dismissal {
        open,
        dismissable,
        popup_open,
        window: shown.map(|inner| inner.response.rect),
        press: ctx.input(|i| i.pointer.primary_pressed().then(|| i.pointer.press_origin()).flatten()),
    }
    .resolve(action)
}

/// Render the "About" dialog. Returns true when it should close.
pub fn show_about_dialog(ctx: &Context) -> bool {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Task Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag across days to create a task,");
                ui.label("drag bar edges to resize it.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    should_close
}
