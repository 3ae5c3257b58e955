pub mod controls;
pub mod guidance;
pub mod render;

pub use controls::{selection_control, threshold_controls, SliderSpec};
pub use guidance::{missing_artifact_notice, unavailable_page};
pub use render::{metric, render_or_notice, render_with_fallback, RenderError, RenderResult};
