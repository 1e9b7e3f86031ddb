//! Test modules for the parameter system

mod group_tests;
mod value_tests;
