//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod clock;
pub mod link;

pub use clock::{clock_task, Display, TubeChain};
pub use link::{link_rx_task, link_tx_task};
