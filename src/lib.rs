#![cfg_attr(not(test), no_std)]

pub mod collector;
pub mod config;
pub mod node;
pub mod protocol;
pub mod soil;
pub mod transport;
