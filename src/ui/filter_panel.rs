use egui::{RichText, Ui};
use egui_phosphor::regular as icons;

use crate::model::{FilterPatch, Filters, TaskCategory, TimeRange};
use crate::ui::theme;

/// Render the filter controls. Returns a patch when anything changed.
pub fn show_filter_panel(filters: &Filters, visible: usize, total: usize, ui: &mut Ui) -> Option<FilterPatch> {
    let mut patch = FilterPatch::default();

    ui.label(RichText::new(format!("{} Search", icons::MAGNIFYING_GLASS)).strong());
    let mut query = filters.search_query.clone();
    let edit = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text("Task name...")
            .desired_width(f32::INFINITY),
    );
    if edit.changed() {
        patch.search_query = Some(query);
    }

    ui.add_space(8.0);
    ui.label(RichText::new(format!("{} Categories", icons::TAG)).strong());
    let mut next = filters.clone();
    for category in TaskCategory::all() {
        let mut checked = filters.categories.contains(category);
        ui.horizontal(|ui| {
            let (swatch, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().rect_filled(swatch, 2.0, theme::category_color(*category));
            if ui.checkbox(&mut checked, category.label()).changed() {
                next.toggle_category(*category);
            }
        });
    }
    if next.categories != filters.categories {
        patch.categories = Some(next.categories.clone());
    }

    ui.add_space(8.0);
    ui.label(RichText::new(format!("{} Time range", icons::CALENDAR_BLANK)).strong());
    for range in TimeRange::all() {
        // Clicking the active range again clears it.
        if ui.radio(next.time_range == Some(*range), range.label()).clicked() {
            next.toggle_time_range(*range);
        }
    }
    if next.time_range != filters.time_range {
        patch.time_range = Some(next.time_range);
    }

    ui.add_space(10.0);
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("Showing {visible} of {total}"))
                .font(theme::font_status())
                .color(theme::TEXT_SECONDARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let clear = ui.add_enabled(filters.is_active(), egui::Button::new("Clear"));
            if clear.clicked() {
                patch = FilterPatch {
                    categories: Some(Vec::new()),
                    time_range: Some(None),
                    search_query: Some(String::new()),
                };
            }
        });
    });

    (!patch.is_empty()).then_some(patch)
}
