// Domain layer - Pure types and functions, no I/O
pub mod chart;
pub mod orientation;
pub mod series;
