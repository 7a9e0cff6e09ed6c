//! Reading position and the page list it indexes into.

pub mod pages;
pub mod view;

pub use pages::PageSequence;
pub use view::{PagePair, SliderPosition, View, max_left};
