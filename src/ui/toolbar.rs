use crate::app::{today, PlannerApp};
use crate::model::LaneOrder;
use crate::ui::theme;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Lane order").small().weak());
            for order in [LaneOrder::Insertion, LaneOrder::StartDate] {
                if ui
                    .radio(app.planner.lane_order() == order, order.label())
                    .clicked()
                {
                    app.set_lane_order(order);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Open Settings Folder").clicked() {
                app.open_settings_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button(icons::CARET_LEFT).on_hover_text("Previous month").clicked() {
            app.previous_month();
        }
        if ui.button("Today").clicked() {
            app.go_to(today());
        }
        if ui.button(icons::CARET_RIGHT).on_hover_text("Next month").clicked() {
            app.next_month();
        }
        ui.label(
            RichText::new(app.planner.visible_grid().title())
                .strong()
                .size(15.0),
        );

        // Right-aligned jump-to-date picker
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let picker = ui.add(egui_extras::DatePickerButton::new(&mut app.jump_date).id_salt("jump_to_date"));
            if picker.changed() {
                let date = app.jump_date;
                app.go_to(date);
            }
            ui.label(RichText::new("Go to").size(11.0).weak());
        });
    });
}
