pub mod input;
pub mod progress;
pub mod viewer;

pub use input::*;
pub use progress::*;
pub use viewer::*;
