#[macro_use]
extern crate diesel;

pub mod actions;
pub mod api;
pub mod catalog;
pub mod display;
pub mod error;
pub mod memory;
pub mod models;
pub mod paginate;
pub mod questions;
pub mod quiz;
#[rustfmt::skip]
pub mod schema;
pub mod search;

#[cfg(test)]
mod fixtures;
