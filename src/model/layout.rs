//! Row/lane layout of task bars on the month grid.
//!
//! Every task visible in the grid is split into one segment per calendar row
//! it touches. Within each row, segments are stacked into lanes with a greedy
//! first-fit pass: a segment goes into the first lane where none of the
//! already-placed tasks overlap it. Overlap is judged on the tasks' full date
//! ranges, not on the row-clipped segments, so two tasks that only meet in
//! another row still take separate lanes here.
//!
//! The pass is pure: it never touches the tasks and is recomputed each frame.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::calendar::{MonthGrid, GRID_COLUMNS, GRID_ROWS};
use super::task::Task;

/// Placement of one task segment within one calendar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarPlacement {
    pub task_id: Uuid,
    pub row: usize,
    pub start_col: usize,
    pub end_col: usize,
    pub lane: usize,
}

impl BarPlacement {
    pub fn columns(&self) -> usize {
        self.end_col - self.start_col + 1
    }
}

/// Order in which a row's segments are offered to the greedy lane pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LaneOrder {
    /// Task list order.
    #[default]
    Insertion,
    /// Stable sort by start date, then end date.
    StartDate,
}

impl LaneOrder {
    pub fn label(&self) -> &'static str {
        match self {
            LaneOrder::Insertion => "Creation order",
            LaneOrder::StartDate => "Start date",
        }
    }
}

/// Pixel metrics for turning a placement into a vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarMetrics {
    pub row_height: f32,
    /// Space above the first lane, reserved for the day number.
    pub header_offset: f32,
    pub lane_height: f32,
    pub bar_height: f32,
}

impl Default for BarMetrics {
    fn default() -> Self {
        Self {
            row_height: 96.0,
            header_offset: 26.0,
            lane_height: 22.0,
            bar_height: 20.0,
        }
    }
}

impl BarMetrics {
    /// Top edge of the bar, relative to the top of the grid body.
    pub fn top(&self, placement: &BarPlacement) -> f32 {
        placement.row as f32 * self.row_height
            + self.header_offset
            + placement.lane as f32 * self.lane_height
    }

    /// Lanes that fit inside one row below the day number.
    pub fn visible_lanes(&self) -> usize {
        if self.lane_height <= 0.0 {
            return 0;
        }
        ((self.row_height - self.header_offset) / self.lane_height).floor().max(0.0) as usize
    }
}

/// Grid indices of a task's first and last day.
struct Span<'a> {
    task: &'a Task,
    first: usize,
    last: usize,
}

impl Span<'_> {
    fn rows(&self) -> std::ops::RangeInclusive<usize> {
        self.first / GRID_COLUMNS..=self.last / GRID_COLUMNS
    }
}

/// Both ends must be on the grid; a task spilling past either edge is skipped.
fn visible_span<'a>(task: &'a Task, grid: &MonthGrid) -> Option<Span<'a>> {
    let first = grid.index_of(task.start)?;
    let last = grid.index_of(task.end)?;
    Some(Span { task, first, last })
}

/// Compute bar placements for `tasks` on `grid`.
///
/// Output is task-major: placements follow the input task order, and within
/// a task run from its first row to its last. Tasks whose start or end
/// falls outside the grid produce no placements.
pub fn layout_bars<'a, I>(tasks: I, grid: &MonthGrid, order: LaneOrder) -> Vec<BarPlacement>
where
    I: IntoIterator<Item = &'a Task>,
{
    let spans: Vec<Span<'a>> = tasks
        .into_iter()
        .filter_map(|task| visible_span(task, grid))
        .collect();

    let mut lanes_by_segment: HashMap<(Uuid, usize), usize> = HashMap::new();
    for row in 0..GRID_ROWS {
        let mut members: Vec<&Task> = spans
            .iter()
            .filter(|s| s.rows().contains(&row))
            .map(|s| s.task)
            .collect();
        if order == LaneOrder::StartDate {
            members.sort_by_key(|t| (t.start, t.end));
        }

        let mut lanes: Vec<Vec<&Task>> = Vec::new();
        for task in members {
            let lane = match lanes
                .iter()
                .position(|lane| lane.iter().all(|placed| !placed.overlaps(task)))
            {
                Some(idx) => {
                    lanes[idx].push(task);
                    idx
                }
                None => {
                    lanes.push(vec![task]);
                    lanes.len() - 1
                }
            };
            lanes_by_segment.insert((task.id, row), lane);
        }
    }

    let mut placements = Vec::new();
    for span in &spans {
        let first_row = span.first / GRID_COLUMNS;
        let last_row = span.last / GRID_COLUMNS;
        for row in span.rows() {
            placements.push(BarPlacement {
                task_id: span.task.id,
                row,
                start_col: if row == first_row { span.first % GRID_COLUMNS } else { 0 },
                end_col: if row == last_row { span.last % GRID_COLUMNS } else { GRID_COLUMNS - 1 },
                lane: lanes_by_segment.get(&(span.task.id, row)).copied().unwrap_or(0),
            });
        }
    }

    tracing::trace!(
        visible = spans.len(),
        placements = placements.len(),
        ?order,
        "bar layout computed"
    );
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskCategory;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(name: &str, start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(name, start, end, TaskCategory::ToDo)
    }

    fn june() -> MonthGrid {
        MonthGrid::new(2024, 6).unwrap()
    }

    #[test]
    fn single_row_task() {
        let t = task("Design Review", date(2024, 6, 10), date(2024, 6, 12));
        let placements = layout_bars([&t], &june(), LaneOrder::Insertion);
        assert_eq!(
            placements,
            vec![BarPlacement { task_id: t.id, row: 2, start_col: 1, end_col: 3, lane: 0 }]
        );
        assert_eq!(placements[0].columns(), 3);
    }

    #[test]
    fn multi_row_task_is_split_per_row() {
        // June 5 (Wed, row 1) through June 18 (Tue, row 3).
        let t = task("Sprint", date(2024, 6, 5), date(2024, 6, 18));
        let placements = layout_bars([&t], &june(), LaneOrder::Insertion);
        let spans: Vec<_> = placements.iter().map(|p| (p.row, p.start_col, p.end_col)).collect();
        assert_eq!(spans, vec![(1, 3, 6), (2, 0, 6), (3, 0, 2)]);
    }

    #[test]
    fn overlapping_tasks_stack_into_lanes() {
        let a = task("A", date(2024, 6, 5), date(2024, 6, 7));
        let b = task("B", date(2024, 6, 5), date(2024, 6, 7));
        let placements = layout_bars([&a, &b], &june(), LaneOrder::Insertion);
        assert_eq!(placements[0].lane, 0);
        assert_eq!(placements[1].lane, 1);

        let metrics = BarMetrics::default();
        assert_eq!(metrics.top(&placements[1]) - metrics.top(&placements[0]), metrics.lane_height);
    }

    #[test]
    fn disjoint_tasks_share_a_lane() {
        let a = task("A", date(2024, 6, 2), date(2024, 6, 3));
        let b = task("B", date(2024, 6, 5), date(2024, 6, 6));
        let placements = layout_bars([&a, &b], &june(), LaneOrder::Insertion);
        assert!(placements.iter().all(|p| p.lane == 0));
    }

    #[test]
    fn first_fit_reuses_earlier_free_lane() {
        let a = task("A", date(2024, 6, 2), date(2024, 6, 4));
        let b = task("B", date(2024, 6, 3), date(2024, 6, 6));
        let c = task("C", date(2024, 6, 6), date(2024, 6, 7));
        let placements = layout_bars([&a, &b, &c], &june(), LaneOrder::Insertion);
        let lanes: Vec<_> = placements.iter().map(|p| p.lane).collect();
        assert_eq!(lanes, vec![0, 1, 0]);
    }

    #[test]
    fn overlap_uses_full_range_not_row_segment() {
        // A covers rows 1-2; B sits in row 2 only but overlaps A's full range.
        let a = task("A", date(2024, 6, 6), date(2024, 6, 10));
        let b = task("B", date(2024, 6, 10), date(2024, 6, 11));
        let placements = layout_bars([&a, &b], &june(), LaneOrder::Insertion);
        let b_row2 = placements.iter().find(|p| p.task_id == b.id).unwrap();
        assert_eq!(b_row2.row, 2);
        assert_eq!(b_row2.lane, 1);
    }

    #[test]
    fn start_date_order_can_save_lanes() {
        let a = task("a", date(2024, 6, 9), date(2024, 6, 9));
        let b = task("b", date(2024, 6, 11), date(2024, 6, 11));
        let c = task("c", date(2024, 6, 9), date(2024, 6, 10));
        let d = task("d", date(2024, 6, 10), date(2024, 6, 11));
        let tasks = [&a, &b, &c, &d];

        let by_insertion = layout_bars(tasks, &june(), LaneOrder::Insertion);
        let lanes: Vec<_> = by_insertion.iter().map(|p| p.lane).collect();
        assert_eq!(lanes, vec![0, 0, 1, 2]);

        let by_start = layout_bars(tasks, &june(), LaneOrder::StartDate);
        let lanes: Vec<_> = by_start.iter().map(|p| p.lane).collect();
        // Placements stay in task order; only lane choice changes.
        assert_eq!(lanes, vec![0, 1, 1, 0]);
    }

    #[test]
    fn tasks_not_fully_on_grid_are_skipped() {
        // June 2024 grid runs May 26 to July 6.
        let outside = task("old", date(2024, 1, 1), date(2024, 1, 3));
        let spills_before = task("spill", date(2024, 5, 20), date(2024, 6, 5));
        let spills_after = task("late", date(2024, 7, 4), date(2024, 7, 9));
        let inside = task("edge", date(2024, 5, 26), date(2024, 5, 28));
        let placements = layout_bars(
            [&outside, &spills_before, &spills_after, &inside],
            &june(),
            LaneOrder::Insertion,
        );
        assert_eq!(
            placements,
            vec![BarPlacement { task_id: inside.id, row: 0, start_col: 0, end_col: 2, lane: 0 }]
        );
    }

    #[test]
    fn skipped_tasks_do_not_claim_lanes() {
        let spill = task("spill", date(2024, 5, 20), date(2024, 6, 5));
        let later = task("later", date(2024, 6, 3), date(2024, 6, 4));
        let placements = layout_bars([&spill, &later], &june(), LaneOrder::Insertion);
        assert_eq!(
            placements,
            vec![BarPlacement { task_id: later.id, row: 1, start_col: 1, end_col: 2, lane: 0 }]
        );
    }

    #[test]
    fn no_two_overlapping_tasks_share_a_lane_in_a_row() {
        let base = date(2024, 6, 1);
        let tasks: Vec<Task> = (0..24)
            .map(|i| {
                let start = base + chrono::Duration::days((i * 5) % 23);
                let end = start + chrono::Duration::days(i % 6);
                task(&format!("t{i}"), start, end)
            })
            .collect();
        let by_id: HashMap<Uuid, &Task> = tasks.iter().map(|t| (t.id, t)).collect();

        for order in [LaneOrder::Insertion, LaneOrder::StartDate] {
            let placements = layout_bars(&tasks, &june(), order);
            for a in &placements {
                for b in &placements {
                    if a.task_id != b.task_id && a.row == b.row && a.lane == b.lane {
                        assert!(!by_id[&a.task_id].overlaps(by_id[&b.task_id]));
                    }
                }
            }
        }
    }

    #[test]
    fn visible_lanes_from_metrics() {
        assert_eq!(BarMetrics::default().visible_lanes(), 3);
    }
}
