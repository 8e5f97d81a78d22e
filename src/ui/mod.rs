pub mod input;
pub mod render;

pub use input::{Prompter, PASTE_TERMINATOR};
pub use render::{render_header, render_input_pane, render_outcome, render_report, render_toast};
