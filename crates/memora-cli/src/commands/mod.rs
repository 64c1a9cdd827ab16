//! Command handlers

pub mod annotations;
pub mod chat;
pub mod config;
pub mod modes;
pub mod read;
