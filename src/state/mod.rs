//! Application state module

mod app_state;
mod forms;
mod progress;

pub use app_state::*;
pub use forms::*;
