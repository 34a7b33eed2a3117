//! Screen logic: the gateway seam and the state machines built on it.

pub mod browser;
pub mod editor;
pub mod forms;
pub mod gateway;
pub mod pagination;
pub mod uploads;

#[cfg(test)]
pub(crate) mod testing;
