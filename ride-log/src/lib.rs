//! Personal bus ride log.
//!
//! Records bus rides, validates their fields, and answers questions like
//! "which rides did I take on bus 123?" or "what did I ride after 10pm?".

pub mod clock;
pub mod collection;
pub mod config;
pub mod display;
pub mod domain;
pub mod query;
pub mod shell;
