//! Caller-side QR login polling.

pub mod poller;

pub use poller::{PollOutcome, PollUpdate, QrLoginPoller};
