//! Month-view task planner: calendar grid math, lane layout of task bars,
//! and the drag-to-create / drag-to-resize state machine, plus the egui
//! front end that drives them.

pub mod app;
pub mod config;
pub mod model;
pub mod ui;
