//! Infrastructure layer - hardware and transport adapters
//!
//! Concrete implementations of the composer and remote traits on top of
//! the ESP32 peripherals, plus the embassy tasks that run them.

pub mod drivers;
pub mod tasks;
pub mod types;
