//! Playback tests for `diymon-rs` against real files on disk

mod config;
mod fixture;
mod playback;
mod store;
