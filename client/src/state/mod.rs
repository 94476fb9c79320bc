//! Client-side reactive state.

pub mod app;
