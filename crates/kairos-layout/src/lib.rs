pub mod agenda;
pub mod error;
pub mod field;
pub mod format;
pub mod grid;
pub mod recurrence;
pub mod resource;
pub mod scheduler;
pub mod temporal;
pub mod view;

pub use scheduler::Scheduler;
