//! Non-gameplay scenes
//!
//! Each scene fades in on entry and asks the director for the next scene
//! through [`Services::transition_to`](crate::services::Services::transition_to).

pub mod loader;
pub mod menu;
pub mod summary;

pub use loader::LoaderScreen;
pub use menu::{MainMenu, MenuButton};
pub use summary::{SummaryButton, SummaryScreen};
