//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components receive the [`AppState`](crate::state::app::AppState) or plain
//! values as props; none of them reads identity from context.

pub mod bar_chart;
pub mod dialog;
pub mod field_message;
pub mod guard;
pub mod nav;
pub mod room_card;
