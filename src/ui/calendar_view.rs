use chrono::{Datelike, NaiveDate};
use egui::{Align2, Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::model::calendar::{GRID_COLUMNS, GRID_ROWS};
use crate::model::{
    BarMetrics, BarPlacement, Gesture, GridGeometry, Intent, MonthGrid, Planner, ResizeEdge, Task,
};
use crate::ui::theme;

const WEEKDAYS: [&str; GRID_COLUMNS] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Intents produced by one frame of the calendar, applied by the caller
/// after rendering.
#[derive(Debug, Default)]
pub struct CalendarInteraction {
    pub intents: Vec<Intent>,
}

impl CalendarInteraction {
    fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }
}

/// Pointer input sampled once per frame. Positions are relative to the top
/// left of the grid body.
#[derive(Debug, Clone, Copy, Default)]
struct PointerFrame {
    /// Cell under a primary press that landed on empty cell space.
    pressed: Option<NaiveDate>,
    /// Cell under the pointer while it is over the grid.
    hovered: Option<NaiveDate>,
    /// Pointer position anywhere in the window.
    position: Option<Vec2>,
    released: bool,
}

/// Intents for the active gesture given this frame's pointer input.
///
/// `gesture` is the state before any of this frame's intents are applied, so
/// a press and its release arriving together start and finish a selection
/// in the same frame.
fn gesture_intents(gesture: &Gesture, frame: PointerFrame, geometry: GridGeometry) -> Vec<Intent> {
    let mut intents = Vec::new();
    if gesture.is_resizing() {
        if let Some(pos) = frame.position {
            intents.push(Intent::PointerMove { x: pos.x, y: pos.y, geometry });
        }
        if frame.released {
            intents.push(Intent::PointerUp);
        }
        return intents;
    }

    if let Some(date) = frame.pressed {
        intents.push(Intent::PointerDown(date));
    }
    if gesture.is_selecting() || frame.pressed.is_some() {
        if let Some(date) = frame.hovered {
            intents.push(Intent::PointerEnter(date));
        }
        if frame.released {
            intents.push(Intent::PointerUp);
        }
    }
    intents
}

/// Render the month grid with its task bars.
pub fn show_calendar(
    planner: &Planner,
    metrics: &BarMetrics,
    today: NaiveDate,
    ui: &mut Ui,
) -> CalendarInteraction {
    let mut interaction = CalendarInteraction::default();
    let grid = planner.visible_grid();
    let width = ui.available_width();

    draw_weekday_header(ui, width);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(width, metrics.row_height * GRID_ROWS as f32),
                Sense::click_and_drag(),
            );
            let body = response.rect;
            let geometry = GridGeometry::from_size(body.width(), metrics.row_height);
            let date_at = |pos: Pos2| geometry.date_at(grid, pos.x - body.min.x, pos.y - body.min.y);

            painter.rect_filled(body, 0.0, theme::BG_DARK);
            let hover = response.hover_pos();
            for (index, date) in grid.dates().iter().enumerate() {
                let cell = cell_rect(body, &geometry, index);
                let hovered = hover.is_some_and(|p| cell.contains(p));
                draw_cell(&painter, cell, grid, *date, today, planner.is_highlighted(*date), hovered);
            }

            let placements = planner.layout(today);
            let lanes = metrics.visible_lanes();
            let mut hidden = [[0usize; GRID_COLUMNS]; GRID_ROWS];
            for placement in &placements {
                let Some(task) = planner.task(placement.task_id) else {
                    continue;
                };
                if placement.lane >= lanes {
                    for col in placement.start_col..=placement.end_col {
                        hidden[placement.row][col] += 1;
                    }
                    continue;
                }
                show_bar(ui, &painter, &mut interaction, grid, body, &geometry, metrics, placement, task);
            }
            draw_overflow(&painter, body, &geometry, &hidden);

            // Selection starts on a press over empty cell space; the active
            // gesture then follows the pointer anywhere, not only over the
            // widget that started it.
            let frame = ui.input(|i| {
                let pressed = (response.hovered() && i.pointer.primary_pressed())
                    .then(|| i.pointer.press_origin())
                    .flatten();
                let latest = i.pointer.latest_pos();
                PointerFrame {
                    pressed: pressed.map(date_at),
                    hovered: latest.filter(|p| body.contains(*p)).map(date_at),
                    position: latest.map(|p| p - body.min),
                    released: i.pointer.any_released(),
                }
            });
            if planner.gesture().is_resizing() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            }
            interaction
                .intents
                .extend(gesture_intents(planner.gesture(), frame, geometry));
        });

    interaction
}

fn cell_rect(body: Rect, geometry: &GridGeometry, index: usize) -> Rect {
    let (row, col) = MonthGrid::position(index);
    Rect::from_min_size(
        Pos2::new(
            body.min.x + col as f32 * geometry.column_width,
            body.min.y + row as f32 * geometry.row_height,
        ),
        Vec2::new(geometry.column_width, geometry.row_height),
    )
}

fn draw_weekday_header(ui: &mut Ui, width: f32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, theme::WEEKDAY_HEADER_HEIGHT), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    let col_w = width / GRID_COLUMNS as f32;
    for (col, name) in WEEKDAYS.iter().enumerate() {
        painter.text(
            Pos2::new(rect.min.x + (col as f32 + 0.5) * col_w, rect.center().y),
            Align2::CENTER_CENTER,
            *name,
            theme::font_header(),
            theme::TEXT_SECONDARY,
        );
    }
}

fn draw_cell(
    painter: &egui::Painter,
    cell: Rect,
    grid: &MonthGrid,
    date: NaiveDate,
    today: NaiveDate,
    highlighted: bool,
    hovered: bool,
) {
    let in_month = grid.is_in_month(date);
    let fill = if in_month { theme::BG_CELL } else { theme::BG_CELL_MUTED };
    painter.rect_filled(cell, 0.0, fill);
    if highlighted {
        painter.rect_filled(cell, 0.0, theme::BG_SELECTED);
    } else if hovered {
        painter.rect_filled(cell, 0.0, theme::BG_CELL_HOVER);
    }
    painter.rect_stroke(cell, 0.0, Stroke::new(0.5, theme::BORDER_SUBTLE));

    let label_pos = Pos2::new(cell.min.x + 14.0, cell.min.y + 12.0);
    let color = if !in_month {
        theme::TEXT_DIM
    } else if date == today {
        painter.circle_filled(label_pos, 10.0, theme::TODAY);
        Color32::WHITE
    } else {
        theme::TEXT_PRIMARY
    };
    painter.text(label_pos, Align2::CENTER_CENTER, date.day().to_string(), theme::font_day(), color);
}

#[allow(clippy::too_many_arguments)]
fn show_bar(
    ui: &mut Ui,
    painter: &egui::Painter,
    interaction: &mut CalendarInteraction,
    grid: &MonthGrid,
    body: Rect,
    geometry: &GridGeometry,
    metrics: &BarMetrics,
    placement: &BarPlacement,
    task: &Task,
) {
    let bar_rect = Rect::from_min_size(
        Pos2::new(
            body.min.x + placement.start_col as f32 * geometry.column_width + theme::BAR_INSET_X,
            body.min.y + metrics.top(placement),
        ),
        Vec2::new(
            placement.columns() as f32 * geometry.column_width - theme::BAR_INSET_X * 2.0,
            metrics.bar_height,
        ),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 1.5)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, theme::category_color(task.category));

    if bar_rect.width() > 24.0 {
        let galley = painter.layout_no_wrap(task.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(bar_rect.shrink2(Vec2::new(4.0, 0.0)))
            .galley(Pos2::new(bar_rect.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
    }

    let bar_response = ui.interact(
        bar_rect,
        ui.make_persistent_id(("task-bar", task.id, placement.row)),
        Sense::click(),
    );
    if bar_response.double_clicked() {
        interaction.push(Intent::OpenEditor(task.id));
    }
    bar_response.context_menu(|ui| {
        if ui.button(format!("{} Edit", egui_phosphor::regular::PENCIL_SIMPLE)).clicked() {
            interaction.push(Intent::OpenEditor(task.id));
            ui.close_menu();
        }
        if ui.button(format!("{} Delete", egui_phosphor::regular::TRASH)).clicked() {
            interaction.push(Intent::DeleteTask(task.id));
            ui.close_menu();
        }
    });

    // Handles only on the segments holding the task's real first and last day.
    let segment_start = grid.date_at(placement.row, placement.start_col);
    let segment_end = grid.date_at(placement.row, placement.end_col);
    let mut handle_hovered = false;
    for (edge, visible, x) in [
        (ResizeEdge::Start, segment_start == Some(task.start), bar_rect.left()),
        (ResizeEdge::End, segment_end == Some(task.end), bar_rect.right()),
    ] {
        if !visible {
            continue;
        }
        let handle_rect = Rect::from_min_max(
            Pos2::new(x - theme::HANDLE_WIDTH * 0.5, bar_rect.top()),
            Pos2::new(x + theme::HANDLE_WIDTH * 0.5, bar_rect.bottom()),
        );
        let handle = ui.interact(
            handle_rect.expand(2.0),
            ui.make_persistent_id(("task-resize", task.id, edge)),
            Sense::drag(),
        );
        if handle.drag_started() {
            interaction.push(Intent::BeginResize { task_id: task.id, edge });
        }
        if handle.hovered() {
            handle_hovered = true;
            let pill_h = bar_rect.height() * 0.55;
            let pill = Rect::from_center_size(Pos2::new(x, bar_rect.center().y), Vec2::new(4.0, pill_h));
            painter.rect_filled(pill, Rounding::same(2.0), theme::HANDLE_COLOR);
        }
    }

    if handle_hovered {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    } else if bar_response.hovered() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("task-tip", task.id)),
            |ui| {
                ui.strong(&task.name);
                ui.label(format!(
                    "{} → {}",
                    task.start.format("%d/%m/%Y"),
                    task.end.format("%d/%m/%Y"),
                ));
                let days = task.span_days();
                ui.label(format!(
                    "{} · {} day{}",
                    task.category.label(),
                    days,
                    if days == 1 { "" } else { "s" }
                ));
            },
        );
    }
}

fn draw_overflow(
    painter: &egui::Painter,
    body: Rect,
    geometry: &GridGeometry,
    hidden: &[[usize; GRID_COLUMNS]; GRID_ROWS],
) {
    for (row, cols) in hidden.iter().enumerate() {
        for (col, count) in cols.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            let cell = cell_rect(body, geometry, row * GRID_COLUMNS + col);
            painter.text(
                cell.right_bottom() - Vec2::new(6.0, 4.0),
                Align2::RIGHT_BOTTOM,
                format!("+{count} more"),
                theme::font_small(),
                theme::TEXT_SECONDARY,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn geometry() -> GridGeometry {
        GridGeometry::from_size(700.0, 96.0)
    }

    #[test]
    fn press_and_release_in_one_frame_finish_the_selection() {
        let day = date(2024, 6, 12);
        let frame = PointerFrame {
            pressed: Some(day),
            hovered: Some(day),
            position: Some(Vec2::new(350.0, 200.0)),
            released: true,
        };
        let intents = gesture_intents(&Gesture::Idle, frame, geometry());
        assert_eq!(
            intents,
            vec![Intent::PointerDown(day), Intent::PointerEnter(day), Intent::PointerUp]
        );

        let mut planner = Planner::new(date(2024, 6, 1)).unwrap();
        for intent in intents {
            planner.dispatch(intent);
        }
        assert!(planner.gesture().is_idle());
        assert!(planner.dialog().is_some());
    }

    #[test]
    fn selection_tracks_hover_until_release() {
        let anchor = date(2024, 6, 10);
        let selecting = Gesture::Selecting { anchor, days: vec![anchor] };
        let over = date(2024, 6, 11);

        let moving = PointerFrame { hovered: Some(over), ..Default::default() };
        assert_eq!(gesture_intents(&selecting, moving, geometry()), vec![Intent::PointerEnter(over)]);

        let off_grid = PointerFrame { released: true, ..Default::default() };
        assert_eq!(gesture_intents(&selecting, off_grid, geometry()), vec![Intent::PointerUp]);
    }

    #[test]
    fn idle_hover_and_release_do_nothing() {
        let frame = PointerFrame {
            hovered: Some(date(2024, 6, 3)),
            position: Some(Vec2::new(10.0, 10.0)),
            released: true,
            ..Default::default()
        };
        assert!(gesture_intents(&Gesture::Idle, frame, geometry()).is_empty());
    }

    #[test]
    fn resize_follows_position_outside_the_grid() {
        let task = Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo);
        let resizing = Gesture::Resizing {
            task_id: task.id,
            edge: ResizeEdge::End,
            original_start: task.start,
            original_end: task.end,
        };
        let frame = PointerFrame {
            position: Some(Vec2::new(900.0, -40.0)),
            released: true,
            ..Default::default()
        };
        assert_eq!(
            gesture_intents(&resizing, frame, geometry()),
            vec![
                Intent::PointerMove { x: 900.0, y: -40.0, geometry: geometry() },
                Intent::PointerUp,
            ]
        );
    }
}
