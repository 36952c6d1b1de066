//! # sortviz-tui
//!
//! Interactive terminal front-end using ratatui with the Elm architecture:
//! a single [`TuiApp`] model, messages from a background [`Worker`], and
//! pure render functions per view.

pub mod comparison;
pub mod footer;
pub mod forms;
pub mod header;
pub mod history;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod prediction;
pub mod styles;
pub mod surface;
pub mod visualizer;
pub mod worker;

pub use forms::{PredictForm, RunForm};
pub use keymap::{KeyAction, View};
pub use logs::LogBuffer;
pub use messages::{Command, TuiMessage};
pub use model::{TuiApp, TuiOptions};
pub use surface::CanvasSurface;
pub use worker::Worker;
