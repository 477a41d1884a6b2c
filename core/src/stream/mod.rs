//! stream/mod.rs
//! Buffer management and the drive loop, plus the one-shot public API.

pub mod input;
pub mod output;
pub mod scratch;
pub mod driver;
pub mod core;

pub use input::InputCursor;
pub use output::{next_capacity, OutputArranger};
pub use scratch::ScratchBuffer;
pub use driver::{drive, DriveOutcome};
pub use self::core::*;
