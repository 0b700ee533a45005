// Copyright 2021 Peter Williams <pwil3058@gmail.com> <pwil3058@bigpond.net.au>

use lalr_runtime::Tables;

use crate::codegen;
use crate::error::GeneratorError;
use crate::grammar::Grammar;
use crate::lr0;
use crate::options::GeneratorOptions;
use crate::relation;
use crate::table;

/// The finished product of a generation run: the tables the runtime
/// drivers interpret, plus how many unresolved conflicts survived
/// `expect:` (spec §6.1's "a parser object").
pub struct Generated<A> {
    pub tables: Tables<A>,
    pub unresolved_conflicts: usize,
}

/// Runs grammar intake's output through LR(0) construction (B), the
/// relation engine (C), and table assembly (D/E), honoring `options`
/// (spec §6.1). The single entry point a host calls after building a
/// `Grammar` with `GrammarBuilder`.
pub fn generate<A>(grammar: Grammar<A>, options: &GeneratorOptions) -> Result<Generated<A>, GeneratorError> {
    let grammar = if options.is_glr() {
        grammar.without_error_productions()
    } else {
        grammar
    };

    let automaton = lr0::build(&grammar);
    let lookaheads = relation::compute(&grammar, &automaton);
    let assembled = table::assemble(&grammar, &automaton, &lookaheads, options.is_glr());

    if let Some(out_table) = options.out_table() {
        let dump = codegen::write_table_dump(&grammar, &automaton, &assembled.tables);
        std::fs::write(out_table, dump)?;
    }

    if let Some((name, path)) = options.output() {
        let artifact = codegen::write_driver_artifact(name, &grammar);
        std::fs::write(path, artifact)?;
    }

    if assembled.unresolved_conflicts > options.expect() {
        return Err(GeneratorError::UnexpectedConflicts {
            expected: options.expect(),
            found: assembled.unresolved_conflicts,
            detail: assembled.conflict_report,
        });
    }

    Ok(Generated {
        tables: assembled.tables,
        unresolved_conflicts: assembled.unresolved_conflicts,
    })
}
