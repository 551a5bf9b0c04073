//! cdeps - include dependency analysis for C and C++ source trees
//!
//! Scans a project for translation units, resolves their quoted
//! `#include` directives and derives from the resulting graph:
//! Makefile dependency rules, compile-time and link-time levels, and
//! the coupling-density metrics CCD, ACD and NCCD.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod reporters;
pub mod tree;
