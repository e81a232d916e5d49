// App module for vinos_ibericos
// Handles application state and the side effects behind each key

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppScreen, Notice, NoticeKind};
