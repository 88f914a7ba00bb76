// Render module split into focused submodules.

pub mod decorate;
pub mod full;
pub mod input;
pub mod list;
pub mod modeline;
pub mod styles;
pub mod util;

pub use decorate::decorate_candidate;
pub use full::render_full;
pub use input::render_input_block;
pub use list::render_popup;
pub use modeline::render_modeline_padded;
