// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

//! Grammar intake, LR(0) construction, the DeRemer-Pennello lookahead
//! relation engine, and LALR/GLR table assembly. Produces a
//! `lalr_runtime::Tables` value; parsing it is `lalr_runtime`'s job, not
//! this crate's.

pub mod codegen;
pub mod digraph;
pub mod error;
pub mod generator;
pub mod grammar;
pub mod lr0;
pub mod options;
pub mod relation;
pub mod symbol;
pub mod table;

pub use error::GeneratorError;
pub use generator::{generate, Generated};
pub use grammar::{Grammar, GrammarBuilder, ProductionSpec};
pub use options::{DriverKind, GeneratorOptions};
pub use symbol::Associativity;
