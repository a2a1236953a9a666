// Modular tools
pub mod api;
pub mod batch;
pub mod path;
pub mod table;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;
