//! Spelling Master: hear a word, spell it, clear the topic.
//!
//! - `game`: the flow controller and its state machine
//! - `surface`: the terminal screens and key handling
//! - `audio`: pronunciation clips, stings and background music
//! - `app`: the interactive terminal session tying them together

pub mod app;
pub mod audio;
pub mod config;
pub mod game;
pub mod logging;
pub mod surface;
pub mod types;
pub mod words;
