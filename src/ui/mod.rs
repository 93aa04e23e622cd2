//! Terminal presentation: colours, console output, renderers and the menu.

pub mod art;
pub(crate) mod console;
pub mod display;
pub mod menu;
mod palette;

pub use console::Console;
pub use display::ConnectionStatus;
pub use menu::MenuChoice;
pub use palette::Palette;
