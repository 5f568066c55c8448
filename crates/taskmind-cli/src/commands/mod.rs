pub mod advise;
pub mod config;
pub mod events;
pub mod widget;
