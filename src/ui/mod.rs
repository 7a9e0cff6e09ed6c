//! egui rendering of the book and its controls.

pub mod book;
pub mod layout;
pub mod log;
pub mod textures;

pub use book::*;
pub use layout::*;
pub use textures::PageTextures;
