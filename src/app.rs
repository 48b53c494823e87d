use chrono::NaiveDate;

use crate::config::{AppSettings, SettingsStore};
use crate::model::{DialogMode, Intent, LaneOrder, Planner, PlannerError, SubmitOutcome};
use crate::ui;
use crate::ui::dialogs::DialogAction;

/// Main application state.
pub struct PlannerApp {
    pub planner: Planner,
    pub settings: AppSettings,
    pub store: SettingsStore,
    pub status_message: String,
    pub show_about: bool,
    /// Target of the toolbar's jump-to-date picker.
    pub jump_date: NaiveDate,
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl PlannerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: AppSettings,
        store: SettingsStore,
    ) -> Result<Self, PlannerError> {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let today = today();
        let mut planner = if settings.seed_sample_task {
            Planner::with_sample_task(today)?
        } else {
            Planner::new(today)?
        };
        planner.set_lane_order(settings.lane_order);
        planner.set_default_category(settings.default_category);

        Ok(Self {
            planner,
            settings,
            store,
            status_message: "Ready".to_string(),
            show_about: false,
            jump_date: today,
        })
    }

    /// Apply one intent and update the status line.
    pub fn apply(&mut self, intent: Intent) {
        let resizing = self.planner.gesture().resizing_task();
        match intent {
            Intent::SubmitDialog => self.submit_dialog(),
            Intent::PointerUp => {
                if self.planner.pointer_up() {
                    if let Some(task) = resizing.and_then(|id| self.planner.task(id)) {
                        self.status_message = format!(
                            "Updated '{}' ({} → {})",
                            task.name,
                            task.start.format("%Y-%m-%d"),
                            task.end.format("%Y-%m-%d")
                        );
                    }
                }
            }
            Intent::DeleteTask(id) => {
                if let Some(task) = self.planner.delete_task(id) {
                    self.status_message = format!("Deleted '{}'", task.name);
                }
            }
            other => {
                self.planner.dispatch(other);
            }
        }
    }

    fn submit_dialog(&mut self) {
        match self.planner.submit_dialog() {
            SubmitOutcome::Created(id) => {
                if let Some(task) = self.planner.task(id) {
                    self.status_message = format!("Created '{}'", task.name);
                }
            }
            SubmitOutcome::Updated(id) => {
                if let Some(task) = self.planner.task(id) {
                    self.status_message = format!("Updated '{}'", task.name);
                }
            }
            SubmitOutcome::Ignored(reason) => {
                tracing::debug!(?reason, "dialog submit ignored");
            }
        }
    }

    pub fn set_lane_order(&mut self, order: LaneOrder) {
        self.planner.set_lane_order(order);
        self.settings.lane_order = order;
        self.save_settings();
    }

    pub fn save_settings(&mut self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!(error = %e, "failed to save settings");
            self.status_message = format!("Error saving settings: {}", e);
        }
    }

    pub fn open_settings_folder(&mut self) {
        let dir = self.store.dir().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| open::that(&dir)) {
            tracing::warn!(error = %e, dir = %dir.display(), "failed to open settings folder");
            self.status_message = format!("Could not open {}: {}", dir.display(), e);
        }
    }

    fn show_month_or_report(&mut self, result: Result<(), PlannerError>) {
        if let Err(e) = result {
            self.status_message = e.to_string();
        }
    }

    pub fn previous_month(&mut self) {
        let result = self.planner.previous_month();
        self.show_month_or_report(result);
    }

    pub fn next_month(&mut self) {
        let result = self.planner.next_month();
        self.show_month_or_report(result);
    }

    pub fn go_to(&mut self, date: NaiveDate) {
        let result = self.planner.go_to(date);
        self.show_month_or_report(result);
    }

    /// Day span the open dialog refers to.
    fn dialog_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.planner.dialog()?.mode {
            DialogMode::Create { start, end } => Some((start, end)),
            DialogMode::Edit { task_id } => self.planner.task(task_id).map(|t| (t.start, t.end)),
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let today = today();
        let dialog_was_open = self.planner.dialog().is_some();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.show_about {
                self.show_about = false;
            } else {
                self.apply(Intent::Cancel);
            }
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.planner.tasks().len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!("Lanes: {}", self.planner.lane_order().label()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: filters
        let mut filter_patch = None;
        egui::SidePanel::left("filter_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(10.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                let visible = self.planner.filtered_tasks(today).len();
                filter_patch = ui::filter_panel::show_filter_panel(
                    self.planner.filters(),
                    visible,
                    self.planner.tasks().len(),
                    ui,
                );
            });
        if let Some(patch) = filter_patch {
            self.apply(Intent::SetFilters(patch));
        }

        // Central panel: month grid
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::calendar_view::show_calendar(&self.planner, &self.settings.metrics, today, ui)
            })
            .inner;
        for intent in interaction.intents {
            self.apply(intent);
        }

        // Dialogs
        if let Some(range) = self.dialog_range() {
            let action = match self.planner.dialog_mut() {
                Some(dialog) => ui::dialogs::show_task_dialog(dialog, range, dialog_was_open, ctx),
                None => DialogAction::None,
            };
            match action {
                DialogAction::Submit => self.apply(Intent::SubmitDialog),
                DialogAction::Cancel => self.apply(Intent::Cancel),
                DialogAction::Delete => {
                    if let Some(DialogMode::Edit { task_id }) = self.planner.dialog().map(|d| d.mode) {
                        self.apply(Intent::DeleteTask(task_id));
                    }
                }
                DialogAction::None => {}
            }
        }
        if self.show_about && ui::dialogs::show_about_dialog(ctx) {
            self.show_about = false;
        }
    }
}
