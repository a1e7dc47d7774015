//! Events and the append-only action log.

pub mod envelope;
pub mod event;
pub mod handler;
pub mod log;

pub use envelope::LogEntry;
pub use event::Event;
pub use handler::execute;
pub use log::ActionLog;
