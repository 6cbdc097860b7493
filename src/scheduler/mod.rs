pub mod broadcast_loop;
pub mod observer;
pub mod submitted;

pub use broadcast_loop::{CycleReport, SEND_RAW_TRANSACTION, Scheduler};
pub use observer::BroadcastObserver;
pub use submitted::SubmittedSet;
