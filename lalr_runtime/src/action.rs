// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

/// An action table cell. `Conflict` is only ever materialized when the
/// tables were built in GLR mode (spec §4.5); the deterministic assembler
/// always collapses competing tentative actions down to a single variant.
#[derive(Debug, Clone)]
pub enum Action {
    Shift(u32),
    Reduce(u32),
    Accept,
    Error,
    Conflict(Vec<Action>),
}

impl Action {
    pub fn is_error(&self) -> bool {
        matches!(self, Action::Error)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Action::Conflict(_))
    }
}
