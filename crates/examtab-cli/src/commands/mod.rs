pub mod config;
pub mod countdown;
pub mod exam;
pub mod watch;
