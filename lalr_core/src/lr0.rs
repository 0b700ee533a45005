// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use std::collections::{BTreeMap, BTreeSet, HashMap};

use lalr_runtime::Symbol as RuntimeSymbol;

use crate::grammar::Grammar;

/// `(production, dot)`, spec §3's packed item pair. Kept as a struct rather
/// than the single-integer packing the spec mentions as a representation
/// option: `Ord` on the pair already gives the sorted-kernel canonicalization
/// invariant 3 requires, and `BTreeSet` does the packing for us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: u32,
    pub dot: u32,
}

impl Item {
    pub fn start() -> Self {
        Item {
            production: 0,
            dot: 0,
        }
    }

    fn shifted(self) -> Self {
        Item {
            production: self.production,
            dot: self.dot + 1,
        }
    }

    pub fn is_kernel_item(self) -> bool {
        self.dot > 0 || self.production == 0
    }

    pub fn next_symbol<A>(self, grammar: &Grammar<A>) -> Option<RuntimeSymbol> {
        grammar
            .production(self.production)
            .rhs
            .get(self.dot as usize)
            .copied()
    }

    pub fn is_reducible<A>(self, grammar: &Grammar<A>) -> bool {
        self.dot as usize == grammar.production(self.production).rhs.len()
    }
}

pub type Kernel = BTreeSet<Item>;

/// One state of the canonical LR(0) collection: its kernel, full closure,
/// and the transitions out of it keyed by symbol (spec §3 "State").
pub struct State {
    pub id: u32,
    pub kernel: Kernel,
    pub closure: BTreeSet<Item>,
    pub transitions: BTreeMap<RuntimeSymbol, u32>,
}

/// The canonical collection plus the set of nonterminal-transitions that
/// seed the relation engine (spec §4.2's output).
pub struct Automaton {
    pub states: Vec<State>,
}

impl Automaton {
    pub fn nt_transitions(&self) -> Vec<(u32, lalr_runtime::NonTerminalId)> {
        let mut out = Vec::new();
        for state in &self.states {
            for (symbol, _) in &state.transitions {
                if let RuntimeSymbol::NonTerminal(n) = symbol {
                    out.push((state.id, *n));
                }
            }
        }
        out
    }
}

fn closure<A>(grammar: &Grammar<A>, kernel: &Kernel) -> BTreeSet<Item> {
    let mut items: BTreeSet<Item> = kernel.clone();
    let mut expanded: BTreeSet<lalr_runtime::NonTerminalId> = BTreeSet::new();
    let mut worklist: Vec<Item> = kernel.iter().copied().collect();

    while let Some(item) = worklist.pop() {
        if let Some(RuntimeSymbol::NonTerminal(n)) = item.next_symbol(grammar) {
            if expanded.insert(n) {
                for &production in grammar.productions_of(n) {
                    let new_item = Item {
                        production,
                        dot: 0,
                    };
                    if items.insert(new_item) {
                        worklist.push(new_item);
                    }
                }
            }
        }
    }
    items
}

fn goto_kernel<A>(grammar: &Grammar<A>, closure: &BTreeSet<Item>, symbol: RuntimeSymbol) -> Kernel {
    closure
        .iter()
        .filter(|item| item.next_symbol(grammar) == Some(symbol))
        .map(|item| item.shifted())
        .collect()
}

/// Builds the canonical LR(0) collection by worklist, canonicalizing states
/// on kernel equality (spec invariant 3).
pub fn build<A>(grammar: &Grammar<A>) -> Automaton {
    let start_kernel: Kernel = BTreeSet::from([Item::start()]);
    let mut states: Vec<State> = Vec::new();
    let mut index: HashMap<Kernel, u32> = HashMap::new();
    let mut worklist: Vec<u32> = Vec::new();

    let start_closure = closure(grammar, &start_kernel);
    index.insert(start_kernel.clone(), 0);
    states.push(State {
        id: 0,
        kernel: start_kernel,
        closure: start_closure,
        transitions: BTreeMap::new(),
    });
    worklist.push(0);

    while let Some(state_id) = worklist.pop() {
        let symbols: BTreeSet<RuntimeSymbol> = states[state_id as usize]
            .closure
            .iter()
            .filter_map(|item| item.next_symbol(grammar))
            .collect();

        for symbol in symbols {
            let kernel = goto_kernel(grammar, &states[state_id as usize].closure, symbol);
            if kernel.is_empty() {
                continue;
            }
            let target_id = if let Some(&existing) = index.get(&kernel) {
                existing
            } else {
                let id = states.len() as u32;
                let target_closure = closure(grammar, &kernel);
                index.insert(kernel.clone(), id);
                states.push(State {
                    id,
                    kernel,
                    closure: target_closure,
                    transitions: BTreeMap::new(),
                });
                worklist.push(id);
                id
            };
            states[state_id as usize]
                .transitions
                .insert(symbol, target_id);
        }
    }

    Automaton { states }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{GrammarBuilder, ProductionSpec};
    use std::rc::Rc;

    // E -> E PLUS NUM | NUM
    fn expr_grammar() -> Grammar<i64> {
        GrammarBuilder::new()
            .terminals(&["NUM", "PLUS"])
            .unwrap()
            .rule(
                "E",
                vec![
                    ProductionSpec::new(
                        vec!["E".to_string(), "PLUS".to_string(), "NUM".to_string()],
                        Rc::new(|mut v: Vec<i64>| {
                            let rhs = v.pop().unwrap();
                            v.pop();
                            v.pop().unwrap() + rhs
                        }),
                        "E -> E PLUS NUM",
                    ),
                    ProductionSpec::new(vec!["NUM".to_string()], Rc::new(|mut v: Vec<i64>| v.pop().unwrap()), "E -> NUM"),
                ],
            )
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn start_state_closes_over_the_augmented_production() {
        let grammar = expr_grammar();
        let automaton = build(&grammar);
        let start = &automaton.states[0];
        assert!(start.kernel.contains(&Item::start()));
        assert_eq!(start.closure.len(), 3);
    }

    #[test]
    fn states_with_equal_kernels_are_canonicalized() {
        let grammar = expr_grammar();
        let automaton = build(&grammar);
        let mut kernels: std::collections::HashSet<Kernel> = std::collections::HashSet::new();
        for state in &automaton.states {
            assert!(kernels.insert(state.kernel.clone()), "duplicate kernel for distinct states");
        }
    }

    #[test]
    fn reduce_items_are_recognized_at_end_of_rhs() {
        let grammar = expr_grammar();
        let automaton = build(&grammar);
        let has_reduction = automaton
            .states
            .iter()
            .any(|s| s.closure.iter().any(|item| item.is_reducible(&grammar)));
        assert!(has_reduction);
    }
}
