pub mod error;
pub mod lock;
pub mod monitor;
pub mod stdio;
