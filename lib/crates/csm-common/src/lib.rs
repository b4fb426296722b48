pub mod codespace;
pub mod progress;

pub use codespace::{CodespaceDescriptor, CodespaceState};
pub use progress::{OperationStatus, ProgressUpdate};
