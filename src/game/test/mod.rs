//! Tests for the Clue-Less game engine, one submodule per concern.

#![cfg(test)]
#![allow(clippy::bool_assert_comparison)]

pub mod accusation;
pub mod movement;
pub mod suggestion;
pub mod test_utils;
