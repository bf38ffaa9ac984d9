pub mod colors;
mod input;
mod layout;
mod strings;
mod view;

pub use colors::ColorScheme;
pub use input::{handle_key, Command, ConfirmAction, InputMode};
pub use layout::render_ui;
pub use strings::StringTable;
pub use view::DialogView;
