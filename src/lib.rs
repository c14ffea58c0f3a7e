// ABOUTME: Library crate for Chain-in-a-Box exposing public API for testing and external use

pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
