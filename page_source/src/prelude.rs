pub use crate::error::SourceError;
pub use crate::naming::NamingScheme;
pub use crate::{FolderPageSource, MemoryPageSource, PageHandle, PageSource, WebPageSource};
