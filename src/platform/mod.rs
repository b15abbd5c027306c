//! Ready-made collaborator implementations.
//!
//! - `memory`: in-process store, signal hub, recording sink and router, for
//!   headless hosts and tests
//! - `file_store`: JSON-file backed preference store in the user config dir
//! - `clock`: wall clock and manually advanced clock

mod clock;
mod file_store;
mod memory;

pub use clock::{ManualClock, SystemClock};
pub use file_store::FileStore;
pub use memory::{BroadcastThemeSignal, MemoryStore, RecordingRouter, RecordingSink};
