// UI module root: a terminal host for the suggestion engine, split into focused submodules under `ui/`

pub mod model;
pub mod render;
pub mod run;
pub mod update;

// Re-export commonly used symbols so call sites can use `crate::ui::Model` etc.
pub use model::{DemoHost, Model, builtin_config, builtin_options};
pub use render::{render_full, render_input_block, render_modeline_padded, render_popup};
pub use run::run;
pub use update::handle_update;

// Messages used by the update logic
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    KeyBackspace,
    KeyEnter,
    KeyTab,
    KeyEsc,
    KeyUp,
    KeyDown,
    KeyLeft,
    KeyRight,
    Rune(char),
}
