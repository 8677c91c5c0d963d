mod action;
mod answer;
mod author;
mod banner;
mod event;
mod loading;
mod message;
mod textarea;

pub use action::*;
pub use answer::*;
pub use author::*;
pub use banner::*;
pub use event::*;
pub use loading::*;
pub use message::*;
pub use textarea::*;
