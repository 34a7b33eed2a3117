//! Domain layer: the records the console edits and browses.

pub mod entities;
