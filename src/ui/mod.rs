//! UI module - standalone painters and widgets used by the board

pub mod components;
