pub mod blob;
pub mod content_ref;
pub mod error;

pub use blob::Blob;
pub use content_ref::ContentRef;
pub use error::{CoreError, Result};
