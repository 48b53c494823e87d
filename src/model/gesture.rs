use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which end of a task bar is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeEdge {
    Start,
    End,
}

/// The in-flight pointer gesture. At most one exists at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Drag across day cells to pick a range for a new task.
    Selecting {
        anchor: NaiveDate,
        /// Always the ascending inclusive range between `anchor` and the
        /// cell currently under the pointer.
        days: Vec<NaiveDate>,
    },
    /// Drag of one edge of an existing task.
    Resizing {
        task_id: Uuid,
        edge: ResizeEdge,
        original_start: NaiveDate,
        original_end: NaiveDate,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self, Gesture::Selecting { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Gesture::Resizing { .. })
    }

    pub fn selected_days(&self) -> &[NaiveDate] {
        match self {
            Gesture::Selecting { days, .. } => days,
            _ => &[],
        }
    }

    pub fn resizing_task(&self) -> Option<Uuid> {
        match self {
            Gesture::Resizing { task_id, .. } => Some(*task_id),
            _ => None,
        }
    }
}

/// Counts live [`PointerCapture`]s.
///
/// A resize keeps tracking the pointer even when it leaves the bar, so it
/// holds a capture for its whole lifetime. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct CaptureRegistry {
    active: Rc<Cell<usize>>,
}

impl CaptureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> PointerCapture {
        self.active.set(self.active.get() + 1);
        tracing::trace!(active = self.active.get(), "pointer capture acquired");
        PointerCapture {
            registry: self.clone(),
        }
    }

    /// Number of captures not yet released.
    pub fn active(&self) -> usize {
        self.active.get()
    }
}

/// Scoped pointer capture; released exactly once when dropped.
#[derive(Debug)]
pub struct PointerCapture {
    registry: CaptureRegistry,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        let active = &self.registry.active;
        active.set(active.get().saturating_sub(1));
        tracing::trace!(active = active.get(), "pointer capture released");
    }
}
