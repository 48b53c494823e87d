//! The planner state machine.
//!
//! [`Planner`] owns the task list, the visible month, the filters, the
//! in-flight [`Gesture`] and the task dialog. The view layer feeds it pointer
//! and form intents and reads back snapshots and bar layouts; it never
//! mutates tasks directly.

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};
use uuid::Uuid;

use super::calendar::{date_range, is_consecutive, GridGeometry, MonthGrid};
use super::error::PlannerError;
use super::filters::{filter_tasks, FilterPatch, Filters};
use super::gesture::{CaptureRegistry, Gesture, PointerCapture, ResizeEdge};
use super::layout::{layout_bars, BarPlacement, LaneOrder};
use super::task::{Task, TaskCategory};

/// What the open dialog will do on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    /// Create a task over the selected day range.
    Create { start: NaiveDate, end: NaiveDate },
    /// Rename / recategorize an existing task. Dates are left alone.
    Edit { task_id: Uuid },
}

/// Draft state of the create/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDialog {
    pub mode: DialogMode,
    pub name: String,
    pub category: TaskCategory,
}

impl TaskDialog {
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, DialogMode::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Task"
        } else {
            "Create Task"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update"
        } else {
            "Create"
        }
    }
}

/// Why a submission was dropped without changing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoDialog,
    EmptyName,
    /// The task being edited no longer exists; the dialog is closed.
    TaskMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Uuid),
    Updated(Uuid),
    Ignored(IgnoreReason),
}

/// Inbound intents from the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    PointerDown(NaiveDate),
    PointerEnter(NaiveDate),
    PointerUp,
    BeginResize { task_id: Uuid, edge: ResizeEdge },
    /// Pointer position relative to the top-left of the grid body.
    PointerMove { x: f32, y: f32, geometry: GridGeometry },
    ResizeTo(NaiveDate),
    SubmitDialog,
    Cancel,
    OpenEditor(Uuid),
    DeleteTask(Uuid),
    SetFilters(FilterPatch),
    NextMonth,
    PreviousMonth,
    GoTo(NaiveDate),
}

/// Immutable copy of the planner state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSnapshot {
    pub grid: MonthGrid,
    pub tasks: Vec<Task>,
    pub filters: Filters,
    pub gesture: Gesture,
    pub dialog: Option<TaskDialog>,
}

#[derive(Debug)]
pub struct Planner {
    grid: MonthGrid,
    tasks: Vec<Task>,
    filters: Filters,
    gesture: Gesture,
    dialog: Option<TaskDialog>,
    capture: Option<PointerCapture>,
    captures: CaptureRegistry,
    lane_order: LaneOrder,
    default_category: TaskCategory,
}

impl Planner {
    /// An empty planner showing the given month grid.
    pub fn with_grid(grid: MonthGrid) -> Self {
        Self {
            grid,
            tasks: Vec::new(),
            filters: Filters::default(),
            gesture: Gesture::Idle,
            dialog: None,
            capture: None,
            captures: CaptureRegistry::new(),
            lane_order: LaneOrder::default(),
            default_category: TaskCategory::default(),
        }
    }

    /// An empty planner showing the month containing `today`.
    pub fn new(today: NaiveDate) -> Result<Self, PlannerError> {
        MonthGrid::containing(today).map(Self::with_grid)
    }

    /// A planner seeded with a two-day "Sample Task" starting today.
    pub fn with_sample_task(today: NaiveDate) -> Result<Self, PlannerError> {
        let mut planner = Self::new(today)?;
        planner.insert_task(Task::new(
            "Sample Task",
            today,
            today + Duration::days(1),
            TaskCategory::ToDo,
        ));
        Ok(planner)
    }

    pub fn lane_order(&self) -> LaneOrder {
        self.lane_order
    }

    pub fn set_lane_order(&mut self, order: LaneOrder) {
        self.lane_order = order;
    }

    pub fn set_default_category(&mut self, category: TaskCategory) {
        self.default_category = category;
    }

    /// Append a task directly, bypassing the dialog.
    pub fn insert_task(&mut self, task: Task) -> Uuid {
        let id = task.id;
        self.tasks.push(task);
        id
    }

    // --- Queries ---

    pub fn visible_grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn dialog(&self) -> Option<&TaskDialog> {
        self.dialog.as_ref()
    }

    /// Draft fields of the open dialog, for the form widgets to edit in place.
    pub fn dialog_mut(&mut self) -> Option<&mut TaskDialog> {
        self.dialog.as_mut()
    }

    /// True for days in the live selection or in the range awaiting a name.
    pub fn is_highlighted(&self, date: NaiveDate) -> bool {
        if self.gesture.selected_days().contains(&date) {
            return true;
        }
        match self.dialog.as_ref().map(|d| d.mode) {
            Some(DialogMode::Create { start, end }) => start <= date && date <= end,
            _ => false,
        }
    }

    pub fn filtered_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.filters, today)
    }

    /// Bar placements of the filtered tasks on the visible grid.
    pub fn layout(&self, today: NaiveDate) -> Vec<BarPlacement> {
        layout_bars(self.filtered_tasks(today), &self.grid, self.lane_order)
    }

    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            grid: self.grid.clone(),
            tasks: self.tasks.clone(),
            filters: self.filters.clone(),
            gesture: self.gesture.clone(),
            dialog: self.dialog.clone(),
        }
    }

    /// Handle to the capture counter; stays valid after the planner is dropped.
    pub fn capture_registry(&self) -> CaptureRegistry {
        self.captures.clone()
    }

    pub fn active_captures(&self) -> usize {
        self.captures.active()
    }

    // --- Selection gesture ---

    /// Press on a day cell. Starts a new selection unless a resize or the
    /// dialog is active.
    pub fn pointer_down(&mut self, date: NaiveDate) -> bool {
        if self.dialog.is_some() || self.gesture.is_resizing() {
            debug!(%date, gesture = ?self.gesture, "pointer down ignored");
            return false;
        }
        debug!(%date, "selection started");
        self.gesture = Gesture::Selecting {
            anchor: date,
            days: vec![date],
        };
        true
    }

    /// Pointer entered a day cell. Recomputes the selection from the anchor.
    pub fn pointer_enter(&mut self, date: NaiveDate) -> bool {
        match &mut self.gesture {
            Gesture::Selecting { anchor, days } => {
                let range = date_range(*anchor, date);
                if *days == range {
                    return false;
                }
                *days = range;
                true
            }
            _ => false,
        }
    }

    /// Pointer released. A non-empty selection opens the create dialog; a
    /// resize ends with the task already holding its final dates.
    pub fn pointer_up(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Selecting { days, .. } => {
                debug_assert!(is_consecutive(&days));
                let (Some(&start), Some(&end)) = (days.iter().min(), days.iter().max()) else {
                    debug!("empty selection discarded");
                    return false;
                };
                debug!(%start, %end, "selection finished, awaiting task details");
                self.dialog = Some(TaskDialog {
                    mode: DialogMode::Create { start, end },
                    name: String::new(),
                    category: self.default_category,
                });
                true
            }
            Gesture::Resizing { task_id, .. } => {
                self.capture = None;
                if let Some(task) = self.task(task_id) {
                    info!(id = %task_id, start = %task.start, end = %task.end, "task resized");
                }
                true
            }
            Gesture::Idle => false,
        }
    }

    // --- Resize gesture ---

    /// Press on a bar edge. Only possible from idle with no dialog open.
    pub fn begin_resize(&mut self, task_id: Uuid, edge: ResizeEdge) -> bool {
        if !self.gesture.is_idle() || self.dialog.is_some() {
            debug!(id = %task_id, gesture = ?self.gesture, "resize start ignored");
            return false;
        }
        let Some(task) = self.task(task_id) else {
            debug!(id = %task_id, "resize start for unknown task");
            return false;
        };
        debug!(id = %task_id, ?edge, "resize started");
        self.gesture = Gesture::Resizing {
            task_id,
            edge,
            original_start: task.start,
            original_end: task.end,
        };
        self.capture = Some(self.captures.acquire());
        true
    }

    /// Move the dragged edge to `date`, clamped so the range never inverts.
    /// The task is updated immediately.
    pub fn resize_to(&mut self, date: NaiveDate) -> bool {
        let Gesture::Resizing {
            task_id,
            edge,
            original_start,
            original_end,
        } = self.gesture
        else {
            return false;
        };
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let (start, end) = match edge {
            ResizeEdge::Start => (date.min(original_end), original_end),
            ResizeEdge::End => (original_start, date.max(original_start)),
        };
        if task.start == start && task.end == end {
            return false;
        }
        task.start = start;
        task.end = end;
        true
    }

    /// Project a pointer position onto the grid and resize to that day.
    pub fn pointer_move(&mut self, x: f32, y: f32, geometry: &GridGeometry) -> bool {
        if !self.gesture.is_resizing() {
            return false;
        }
        let date = geometry.date_at(&self.grid, x, y);
        self.resize_to(date)
    }

    // --- Dialog ---

    /// Open the edit dialog for a task (double-click on its bar).
    pub fn open_editor(&mut self, task_id: Uuid) -> bool {
        if !self.gesture.is_idle() || self.dialog.is_some() {
            return false;
        }
        let Some(task) = self.task(task_id) else {
            return false;
        };
        self.dialog = Some(TaskDialog {
            mode: DialogMode::Edit { task_id },
            name: task.name.clone(),
            category: task.category,
        });
        true
    }

    /// Submit the dialog with the given fields.
    ///
    /// An empty (after trimming) name is ignored and the dialog stays open.
    pub fn submit_task(&mut self, name: &str, category: TaskCategory) -> SubmitOutcome {
        let Some(mode) = self.dialog.as_ref().map(|d| d.mode) else {
            return SubmitOutcome::Ignored(IgnoreReason::NoDialog);
        };
        let name = name.trim();
        if name.is_empty() {
            debug!("submit with empty name ignored");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyName);
        }

        match mode {
            DialogMode::Create { start, end } => {
                let task = Task::new(name, start, end, category);
                let id = task.id;
                info!(%id, name, %start, %end, %category, "task created");
                self.tasks.push(task);
                self.dialog = None;
                self.gesture = Gesture::Idle;
                SubmitOutcome::Created(id)
            }
            DialogMode::Edit { task_id } => {
                self.dialog = None;
                let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
                    return SubmitOutcome::Ignored(IgnoreReason::TaskMissing);
                };
                task.name = name.to_string();
                task.category = category;
                info!(id = %task_id, name, %category, "task updated");
                SubmitOutcome::Updated(task_id)
            }
        }
    }

    /// Submit using the dialog's own draft fields.
    pub fn submit_dialog(&mut self) -> SubmitOutcome {
        match self.dialog.as_ref() {
            Some(dialog) => {
                let (name, category) = (dialog.name.clone(), dialog.category);
                self.submit_task(&name, category)
            }
            None => SubmitOutcome::Ignored(IgnoreReason::NoDialog),
        }
    }

    /// Abort whatever is in progress: close the dialog, drop the selection,
    /// and restore a task being resized to its original dates.
    pub fn cancel(&mut self) -> bool {
        let had_dialog = self.dialog.take().is_some();
        let gesture = std::mem::take(&mut self.gesture);
        self.capture = None;
        if let Gesture::Resizing {
            task_id,
            original_start,
            original_end,
            ..
        } = gesture
        {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                task.start = original_start;
                task.end = original_end;
            }
            debug!(id = %task_id, "resize cancelled");
        }
        had_dialog || !gesture.is_idle()
    }

    // --- Task collection ---

    pub fn delete_task(&mut self, id: Uuid) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(pos);
        if self.gesture.resizing_task() == Some(id) {
            self.gesture = Gesture::Idle;
            self.capture = None;
        }
        if matches!(self.dialog.as_ref().map(|d| d.mode), Some(DialogMode::Edit { task_id }) if task_id == id)
        {
            self.dialog = None;
        }
        info!(%id, name = %task.name, "task deleted");
        Some(task)
    }

    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.apply(patch);
        debug!(filters = ?self.filters, "filters updated");
    }

    // --- Month navigation ---

    pub fn show_month(&mut self, year: i32, month: u32) -> Result<(), PlannerError> {
        self.grid = MonthGrid::new(year, month)?;
        info!(month = %self.grid.title(), "month shown");
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<(), PlannerError> {
        self.grid = self.grid.next()?;
        info!(month = %self.grid.title(), "month shown");
        Ok(())
    }

    pub fn previous_month(&mut self) -> Result<(), PlannerError> {
        self.grid = self.grid.previous()?;
        info!(month = %self.grid.title(), "month shown");
        Ok(())
    }

    pub fn go_to(&mut self, date: NaiveDate) -> Result<(), PlannerError> {
        self.grid = MonthGrid::containing(date)?;
        info!(month = %self.grid.title(), "month shown");
        Ok(())
    }

    /// Apply one intent. Returns whether anything changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::PointerDown(date) => self.pointer_down(date),
            Intent::PointerEnter(date) => self.pointer_enter(date),
            Intent::PointerUp => self.pointer_up(),
            Intent::BeginResize { task_id, edge } => self.begin_resize(task_id, edge),
            Intent::PointerMove { x, y, geometry } => self.pointer_move(x, y, &geometry),
            Intent::ResizeTo(date) => self.resize_to(date),
            Intent::SubmitDialog => !matches!(self.submit_dialog(), SubmitOutcome::Ignored(_)),
            Intent::Cancel => self.cancel(),
            Intent::OpenEditor(id) => self.open_editor(id),
            Intent::DeleteTask(id) => self.delete_task(id).is_some(),
            Intent::SetFilters(patch) => {
                self.set_filters(patch);
                true
            }
            Intent::NextMonth => self.next_month().is_ok(),
            Intent::PreviousMonth => self.previous_month().is_ok(),
            Intent::GoTo(date) => self.go_to(date).is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june_planner() -> Planner {
        Planner::new(date(2024, 6, 15)).unwrap()
    }

    #[test]
    fn drag_backwards_past_anchor_flips_range() {
        let mut planner = june_planner();
        assert!(planner.pointer_down(date(2024, 6, 12)));
        planner.pointer_enter(date(2024, 6, 14));
        assert_eq!(planner.gesture().selected_days().len(), 3);
        planner.pointer_enter(date(2024, 6, 10));
        assert_eq!(
            planner.gesture().selected_days(),
            &[date(2024, 6, 10), date(2024, 6, 11), date(2024, 6, 12)]
        );
    }

    #[test]
    fn pointer_up_opens_create_dialog_and_goes_idle() {
        let mut planner = june_planner();
        planner.pointer_down(date(2024, 6, 12));
        planner.pointer_enter(date(2024, 6, 10));
        assert!(planner.pointer_up());
        assert!(planner.gesture().is_idle());
        let dialog = planner.dialog().unwrap();
        assert_eq!(
            dialog.mode,
            DialogMode::Create { start: date(2024, 6, 10), end: date(2024, 6, 12) }
        );
        assert!(planner.is_highlighted(date(2024, 6, 11)));
        assert!(!planner.is_highlighted(date(2024, 6, 13)));
    }

    #[test]
    fn single_click_selects_one_day() {
        let mut planner = june_planner();
        planner.pointer_down(date(2024, 6, 3));
        planner.pointer_up();
        assert_eq!(
            planner.dialog().map(|d| d.mode),
            Some(DialogMode::Create { start: date(2024, 6, 3), end: date(2024, 6, 3) })
        );
    }

    #[test]
    fn empty_selection_is_discarded() {
        let mut planner = june_planner();
        planner.gesture = Gesture::Selecting { anchor: date(2024, 6, 3), days: vec![] };
        assert!(!planner.pointer_up());
        assert!(planner.dialog().is_none());
        assert!(planner.gesture().is_idle());
    }

    #[test]
    fn pointer_enter_without_selection_is_noop() {
        let mut planner = june_planner();
        assert!(!planner.pointer_enter(date(2024, 6, 3)));
        assert!(planner.gesture().is_idle());
    }

    #[test]
    fn empty_name_keeps_dialog_open() {
        let mut planner = june_planner();
        planner.pointer_down(date(2024, 6, 3));
        planner.pointer_up();
        assert_eq!(
            planner.submit_task("   ", TaskCategory::ToDo),
            SubmitOutcome::Ignored(IgnoreReason::EmptyName)
        );
        assert!(planner.dialog().is_some());
        assert!(planner.tasks().is_empty());
    }

    #[test]
    fn submit_without_dialog_is_ignored() {
        let mut planner = june_planner();
        assert_eq!(
            planner.submit_task("Task", TaskCategory::ToDo),
            SubmitOutcome::Ignored(IgnoreReason::NoDialog)
        );
    }

    #[test]
    fn submit_trims_name_and_closes_dialog() {
        let mut planner = june_planner();
        planner.pointer_down(date(2024, 6, 3));
        planner.pointer_up();
        let SubmitOutcome::Created(id) = planner.submit_task("  Plan  ", TaskCategory::InProgress) else {
            panic!("expected a created task");
        };
        let task = planner.task(id).unwrap();
        assert_eq!(task.name, "Plan");
        assert_eq!(task.category, TaskCategory::InProgress);
        assert!(planner.dialog().is_none());
    }

    #[test]
    fn edit_changes_name_and_category_only() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("Old", date(2024, 6, 3), date(2024, 6, 5), TaskCategory::ToDo));
        assert!(planner.open_editor(id));
        let dialog = planner.dialog().unwrap();
        assert_eq!(dialog.name, "Old");
        assert!(dialog.is_edit());

        assert_eq!(planner.submit_task("New", TaskCategory::Completed), SubmitOutcome::Updated(id));
        let task = planner.task(id).unwrap();
        assert_eq!((task.name.as_str(), task.category), ("New", TaskCategory::Completed));
        assert_eq!((task.start, task.end), (date(2024, 6, 3), date(2024, 6, 5)));
    }

    #[test]
    fn dialog_draft_is_submitted() {
        let mut planner = june_planner();
        planner.pointer_down(date(2024, 6, 3));
        planner.pointer_up();
        if let Some(dialog) = planner.dialog_mut() {
            dialog.name = "Drafted".into();
            dialog.category = TaskCategory::Review;
        }
        assert!(planner.dispatch(Intent::SubmitDialog));
        assert_eq!(planner.tasks()[0].name, "Drafted");
        assert_eq!(planner.tasks()[0].category, TaskCategory::Review);
    }

    #[test]
    fn resize_start_clamps_to_original_end() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));
        assert!(planner.begin_resize(id, ResizeEdge::Start));
        planner.resize_to(date(2024, 6, 20));
        let task = planner.task(id).unwrap();
        assert_eq!((task.start, task.end), (date(2024, 6, 7), date(2024, 6, 7)));

        planner.resize_to(date(2024, 6, 2));
        let task = planner.task(id).unwrap();
        assert_eq!((task.start, task.end), (date(2024, 6, 2), date(2024, 6, 7)));
    }

    #[test]
    fn resize_end_clamps_to_original_start() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));
        planner.begin_resize(id, ResizeEdge::End);
        planner.resize_to(date(2024, 6, 1));
        let task = planner.task(id).unwrap();
        assert_eq!((task.start, task.end), (date(2024, 6, 5), date(2024, 6, 5)));
    }

    #[test]
    fn pointer_move_projects_onto_grid() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));
        let geometry = GridGeometry::from_size(700.0, 96.0);
        planner.begin_resize(id, ResizeEdge::End);
        // Row 2, col 3 is June 12th.
        assert!(planner.pointer_move(350.0, 200.0, &geometry));
        assert_eq!(planner.task(id).unwrap().end, date(2024, 6, 12));
        // Far below and right of the grid clamps to the last cell.
        planner.pointer_move(9000.0, 9000.0, &geometry);
        assert_eq!(planner.task(id).unwrap().end, date(2024, 7, 6));
        assert!(planner.pointer_up());
        assert!(planner.gesture().is_idle());
        assert_eq!(planner.task(id).unwrap().end, date(2024, 7, 6));
    }

    #[test]
    fn gestures_are_mutually_exclusive() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));

        planner.pointer_down(date(2024, 6, 10));
        assert!(!planner.begin_resize(id, ResizeEdge::End));
        assert!(planner.gesture().is_selecting());
        planner.cancel();

        assert!(planner.begin_resize(id, ResizeEdge::End));
        assert!(!planner.pointer_down(date(2024, 6, 10)));
        assert!(planner.gesture().is_resizing());
    }

    #[test]
    fn capture_released_on_every_exit_path() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));

        planner.begin_resize(id, ResizeEdge::End);
        assert_eq!(planner.active_captures(), 1);
        planner.pointer_up();
        assert_eq!(planner.active_captures(), 0);

        planner.begin_resize(id, ResizeEdge::Start);
        planner.cancel();
        assert_eq!(planner.active_captures(), 0);

        planner.begin_resize(id, ResizeEdge::Start);
        planner.delete_task(id);
        assert_eq!(planner.active_captures(), 0);
        assert!(planner.gesture().is_idle());

        let id = planner.insert_task(Task::new("U", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));
        planner.begin_resize(id, ResizeEdge::Start);
        let registry = planner.capture_registry();
        assert_eq!(registry.active(), 1);
        drop(planner);
        assert_eq!(registry.active(), 0);
    }

    #[test]
    fn cancel_restores_resized_task() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));
        planner.begin_resize(id, ResizeEdge::End);
        planner.resize_to(date(2024, 6, 20));
        assert!(planner.cancel());
        let task = planner.task(id).unwrap();
        assert_eq!((task.start, task.end), (date(2024, 6, 5), date(2024, 6, 7)));
    }

    #[test]
    fn cancel_discards_pending_selection() {
        let mut planner = june_planner();
        planner.pointer_down(date(2024, 6, 3));
        planner.pointer_up();
        assert!(planner.cancel());
        assert!(planner.dialog().is_none());
        assert!(!planner.is_highlighted(date(2024, 6, 3)));
        assert!(!planner.cancel());
    }

    #[test]
    fn no_new_gesture_while_dialog_open() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));
        planner.pointer_down(date(2024, 6, 3));
        planner.pointer_up();
        assert!(!planner.pointer_down(date(2024, 6, 4)));
        assert!(!planner.begin_resize(id, ResizeEdge::End));
        assert!(!planner.open_editor(id));
    }

    #[test]
    fn deleting_edited_task_closes_dialog() {
        let mut planner = june_planner();
        let id = planner.insert_task(Task::new("T", date(2024, 6, 5), date(2024, 6, 7), TaskCategory::ToDo));
        planner.open_editor(id);
        assert!(planner.dispatch(Intent::DeleteTask(id)));
        assert!(planner.dialog().is_none());
        assert!(planner.tasks().is_empty());
        assert!(planner.delete_task(id).is_none());
    }

    #[test]
    fn month_navigation() {
        let mut planner = june_planner();
        assert!(planner.dispatch(Intent::NextMonth));
        assert_eq!(planner.visible_grid().title(), "July 2024");
        planner.previous_month().unwrap();
        planner.previous_month().unwrap();
        assert_eq!(planner.visible_grid().title(), "May 2024");
        planner.go_to(date(2025, 1, 20)).unwrap();
        assert_eq!(planner.visible_grid().title(), "January 2025");
        assert!(planner.show_month(2025, 13).is_err());
        assert_eq!(planner.visible_grid().title(), "January 2025");
    }

    #[test]
    fn snapshot_is_detached() {
        let mut planner = june_planner();
        planner.pointer_down(date(2024, 6, 3));
        let snapshot = planner.snapshot();
        planner.cancel();
        assert!(snapshot.gesture.is_selecting());
        assert!(planner.gesture().is_idle());
    }

    #[test]
    fn sample_task_spans_today_and_tomorrow() {
        let today = date(2024, 6, 15);
        let planner = Planner::with_sample_task(today).unwrap();
        let task = &planner.tasks()[0];
        assert_eq!(task.name, "Sample Task");
        assert_eq!((task.start, task.end), (today, date(2024, 6, 16)));
    }
}
