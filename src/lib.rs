#![forbid(unsafe_code)]

pub mod artifact;
pub mod cli;
pub mod config;
pub mod download;
pub mod extract;
pub mod formats;
pub mod list;
pub mod logging;
pub mod portal;
pub mod transport;
