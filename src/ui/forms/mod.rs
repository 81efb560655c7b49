//! Wizard step rendering
//!
//! - `step_page`: the frame around the active step and its buttons
//! - `field_renderer`: text and select inputs
//! - `radio`: single-choice option lists
//! - `review`: final summary and consent

mod field_renderer;
mod radio;
mod review;
mod step_page;

pub use step_page::draw_step;
