pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
pub mod events;
mod scroll;
mod themes;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use scroll::*;
pub use themes::*;
