// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::path::PathBuf;

/// Which driver the table assembler targets (spec §4.5/§6.1 `driver:`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverKind {
    #[default]
    Lalr,
    Glr,
}

/// The typed form of the §6.1 options map. Accumulated with builder calls
/// the way `alap_gen_ng::grammar::Specification` and `symbol::SymbolTable`
/// accumulate state, rather than parsed from a config file — the teacher
/// has no config-file format for this generator, only constructor and
/// builder-method arguments.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    output: Option<(String, PathBuf)>,
    out_table: Option<PathBuf>,
    expect: usize,
    driver: DriverKind,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.output = Some((name.into(), path.into()));
        self
    }

    pub fn with_out_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_table = Some(path.into());
        self
    }

    pub fn with_expect(mut self, expect: usize) -> Self {
        self.expect = expect;
        self
    }

    pub fn with_driver(mut self, driver: DriverKind) -> Self {
        self.driver = driver;
        self
    }

    pub fn output(&self) -> Option<&(String, PathBuf)> {
        self.output.as_ref()
    }

    pub fn out_table(&self) -> Option<&PathBuf> {
        self.out_table.as_ref()
    }

    pub fn expect(&self) -> usize {
        self.expect
    }

    pub fn driver(&self) -> DriverKind {
        self.driver
    }

    pub fn is_glr(&self) -> bool {
        self.driver == DriverKind::Glr
    }
}
