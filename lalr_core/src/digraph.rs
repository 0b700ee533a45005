// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use lalr_runtime::TerminalSet;

/// The DeRemer-Pennello digraph algorithm (spec §4.3): a Tarjan-style SCC
/// traversal where every node in an SCC ends up with the union of the base
/// sets of every node reachable from it. `relation.rs` calls this twice,
/// once per fixpoint (`DR`/`reads` and `Read`/`includes`), differing only
/// in the base sets and edge lists passed in.
struct Digraph<'a> {
    edges: &'a [Vec<usize>],
    result: Vec<TerminalSet>,
    mark: Vec<usize>,
    stack: Vec<usize>,
}

const UNVISITED: usize = 0;
const DONE: usize = usize::MAX;

impl<'a> Digraph<'a> {
    fn traverse(&mut self, x: usize) {
        self.stack.push(x);
        let depth = self.stack.len();
        self.mark[x] = depth;

        for i in 0..self.edges[x].len() {
            let y = self.edges[x][i];
            if self.mark[y] == UNVISITED {
                self.traverse(y);
            }
            if self.mark[y] < self.mark[x] {
                self.mark[x] = self.mark[y];
            }
            let y_result = self.result[y].clone();
            self.result[x].union_with(&y_result);
        }

        if self.mark[x] == depth {
            loop {
                let top = self.stack.pop().expect("depth marker without a matching stack frame");
                self.mark[top] = DONE;
                if top == x {
                    break;
                }
                self.result[top] = self.result[x].clone();
            }
        }
    }
}

/// Solves `result[x] = base[x] ∪ ⋃ { result[y] | edges[x] ∋ y }` as a least
/// fixpoint over a graph that may contain cycles.
pub fn solve(edges: &[Vec<usize>], base: Vec<TerminalSet>) -> Vec<TerminalSet> {
    let num_nodes = base.len();
    let mut digraph = Digraph {
        edges,
        result: base,
        mark: vec![UNVISITED; num_nodes],
        stack: Vec::new(),
    };
    for x in 0..num_nodes {
        if digraph.mark[x] == UNVISITED {
            digraph.traverse(x);
        }
    }
    digraph.result
}
