pub mod calendar;
pub mod error;
pub mod filters;
pub mod gesture;
pub mod layout;
pub mod planner;
pub mod task;

pub use calendar::{GridGeometry, MonthGrid};
pub use error::PlannerError;
pub use filters::{FilterPatch, Filters, TimeRange};
pub use gesture::{CaptureRegistry, Gesture, PointerCapture, ResizeEdge};
pub use layout::{layout_bars, BarMetrics, BarPlacement, LaneOrder};
pub use planner::{
    DialogMode, IgnoreReason, Intent, Planner, PlannerSnapshot, SubmitOutcome, TaskDialog,
};
pub use task::{Task, TaskCategory};
