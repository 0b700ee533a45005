// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::collections::HashMap;

use crate::action::Action;
use crate::error::ParseError;
use crate::tables::Tables;
use crate::token::Token;

/// One parse branch of the graph-structured stack: its own state sequence
/// and the semantic values attached to each pushed symbol.
#[derive(Clone)]
struct Branch<A> {
    states: Vec<u32>,
    values: Vec<A>,
}

/// GLR driver (spec §4.5/§4.7). `tables` must have been built with
/// `driver: glr`, so `Conflict` cells are present instead of being
/// collapsed. Every candidate of a `Conflict` forks the branch it was read
/// from; branches that reach the same state sequence on the same input
/// prefix are merged. Returns every semantic value reachable by a branch
/// that accepts.
pub fn parse<A, L>(tables: &Tables<A>, mut next_token: L) -> Result<Vec<A>, ParseError>
where
    A: Clone,
    L: FnMut() -> Token<A>,
{
    let mut frontier = vec![Branch {
        states: vec![0],
        values: Vec::new(),
    }];
    let mut accepted = Vec::new();

    loop {
        let lookahead = next_token();
        let mut work = std::mem::take(&mut frontier);
        let mut shiftable = Vec::new();

        while let Some(branch) = work.pop() {
            step(tables, branch, &lookahead, &mut work, &mut shiftable, &mut accepted);
        }

        frontier = merge(shiftable);
        if lookahead.is_eoi() || frontier.is_empty() {
            break;
        }
    }

    if accepted.is_empty() {
        Err(ParseError::Unrecoverable)
    } else {
        Ok(accepted)
    }
}

fn step<A: Clone>(
    tables: &Tables<A>,
    branch: Branch<A>,
    lookahead: &Token<A>,
    work: &mut Vec<Branch<A>>,
    shiftable: &mut Vec<Branch<A>>,
    accepted: &mut Vec<A>,
) {
    let state = *branch.states.last().unwrap();
    apply(tables, branch, tables.action(state, lookahead.category()), lookahead, work, shiftable, accepted);
}

fn apply<A: Clone>(
    tables: &Tables<A>,
    mut branch: Branch<A>,
    action: &Action,
    lookahead: &Token<A>,
    work: &mut Vec<Branch<A>>,
    shiftable: &mut Vec<Branch<A>>,
    accepted: &mut Vec<A>,
) {
    match action {
        Action::Shift(next_state) => {
            branch.states.push(*next_state);
            branch.values.push(lookahead.value().clone());
            shiftable.push(branch);
        }
        Action::Reduce(production) => {
            let rule = tables.rule(*production);
            let n = rule.rhs_len;
            // A well-formed table never reduces past the branch's base state,
            // but nothing here enforces that invariant on the caller's
            // behalf (Tables can be hand-built), so guard rather than panic
            // on an ill-formed stack.
            if branch.states.len() <= n || branch.values.len() < n {
                return;
            }
            let len = branch.states.len();
            branch.states.truncate(len - n);
            let rhs = branch.values.split_off(branch.values.len() - n);
            let value = (rule.action)(rhs);
            let top = *branch.states.last().unwrap();
            if let Some(next_state) = tables.goto(top, rule.lhs) {
                branch.states.push(next_state);
                branch.values.push(value);
                work.push(branch);
            }
        }
        Action::Accept => {
            if let Some(value) = branch.values.pop() {
                accepted.push(value);
            }
        }
        Action::Error => {}
        Action::Conflict(candidates) => {
            for candidate in candidates {
                apply(tables, branch.clone(), candidate, lookahead, work, shiftable, accepted);
            }
        }
    }
}

/// Collapses branches that share a state sequence. Keeps the first branch
/// reaching each sequence; the rest are redundant derivations of the same
/// continuation and are dropped rather than tracked as a packed forest.
fn merge<A>(branches: Vec<Branch<A>>) -> Vec<Branch<A>> {
    let mut seen: HashMap<Vec<u32>, Branch<A>> = HashMap::new();
    for branch in branches {
        seen.entry(branch.states.clone()).or_insert(branch);
    }
    seen.into_values().collect()
}
