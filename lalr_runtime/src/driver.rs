// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use crate::action::Action;
use crate::error::ParseError;
use crate::tables::Tables;
use crate::token::{TerminalId, Token};

/// Deterministic LALR driver (spec §4.7): a stack of `(state, value)` pairs
/// and a one-token lookahead buffer. `next_token` is called once per shift
/// and once more at start-up; `on_error` is invoked exactly once per syntax
/// error episode, mirroring `lalr1_plus::ReportError`'s single-call contract.
pub fn parse<A, L, E>(tables: &Tables<A>, mut next_token: L, mut on_error: E) -> Result<A, ParseError>
where
    A: Default,
    L: FnMut() -> Token<A>,
    E: FnMut(&str, Option<&Token<A>>),
{
    let mut states: Vec<u32> = vec![0];
    let mut values: Vec<A> = Vec::new();
    let mut lookahead = next_token();

    loop {
        let state = *states.last().unwrap();
        match tables.action(state, lookahead.category()) {
            Action::Shift(next_state) => {
                let next_state = *next_state;
                states.push(next_state);
                values.push(lookahead.into_value());
                lookahead = next_token();
            }
            Action::Reduce(production) => {
                let production = *production;
                let rule = tables.rule(production);
                let n = rule.rhs_len;
                let len = states.len();
                states.truncate(len - n);
                let rhs = values.split_off(values.len() - n);
                let value = (rule.action)(rhs);
                let top = *states.last().unwrap();
                let next_state = tables
                    .goto(top, rule.lhs)
                    .expect("goto table has no entry for a reachable reduction");
                states.push(next_state);
                values.push(value);
            }
            Action::Accept => {
                return Ok(values.pop().expect("accept reached with an empty value stack"));
            }
            Action::Error | Action::Conflict(_) => {
                let message = format!(
                    "Syntax Error: expected one of {} found {} at {}.",
                    tables.expected_terminals(state),
                    tables.terminal_name(lookahead.category()),
                    lookahead.location()
                );
                on_error(&message, Some(&lookahead));
                if recover(tables, &mut states, &mut values, &mut lookahead, &mut next_token) {
                    continue;
                }
                return Err(ParseError::Unrecoverable);
            }
        }
    }
}

/// Panic-mode recovery (spec §4.6): pop states until one has a defined
/// shift on `*error*`, push that shift, then discard tokens until the
/// synchronization set for the recovered-into state is matched or input
/// is exhausted. Returns `false` if no viable state was found.
fn recover<A, L>(
    tables: &Tables<A>,
    states: &mut Vec<u32>,
    values: &mut Vec<A>,
    lookahead: &mut Token<A>,
    next_token: &mut L,
) -> bool
where
    A: Default,
    L: FnMut() -> Token<A>,
{
    loop {
        let top = *states.last().unwrap();
        if let Action::Shift(next_state) = tables.action(top, TerminalId::ERROR) {
            let next_state = *next_state;
            states.push(next_state);
            values.push(A::default());
            let sync = tables.sync_terminals_for(next_state);
            while !sync.contains(lookahead.category()) && !lookahead.is_eoi() {
                *lookahead = next_token();
            }
            return true;
        }
        if states.len() <= 1 {
            return false;
        }
        states.pop();
        values.pop();
    }
}
