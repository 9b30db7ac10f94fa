mod lock;
mod registry;

pub(crate) use lock::{read, write};
pub(crate) use registry::{CursorRegistry, CursorToken};
