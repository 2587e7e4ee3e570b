pub mod clock;
pub mod compute;
pub mod config;
pub mod constants;
pub mod controls;
pub mod entities;
