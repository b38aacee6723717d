//! Handler behavior seen through the router

pub mod commands_test;
