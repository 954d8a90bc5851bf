//! Case-table resolution
//!
//! Given a successful pattern match and a compiled case table, evaluate the
//! guards in declared order and return the first satisfied branch's outcome.
//! `@default` always satisfies (the compiler guarantees it is last); a table
//! with no `@default` and no satisfied guard is a grammar authoring defect
//! and surfaces as `NoMatchingCase` rather than silently emitting nothing,
//! which could desynchronize the cursor.

use crate::prism::compile::compiler::{
    CaseBranch, CompiledGrammar, Guard, GuardTest, Operand, PatternRhs, TokenSpec,
};
use crate::prism::compile::template::SubstitutionContext;
use crate::prism::engine::executor::TokenizeError;
use regex::RegexBuilder;

/// Match data a case table is evaluated against.
pub struct MatchContext<'a> {
    /// The whole matched text.
    pub matched: &'a str,
    /// Capture group texts, group 1 first.
    pub captures: &'a [&'a str],
    /// Full dotted name of the current state.
    pub state: &'a str,
    /// True when the match ends exactly at the end of the line.
    pub eos: bool,
}

impl<'a> MatchContext<'a> {
    fn substitution(&self) -> SubstitutionContext<'a> {
        SubstitutionContext {
            matched: self.matched,
            captures: self.captures,
            state: self.state,
        }
    }

    fn operand_text(&self, operand: Operand) -> &'a str {
        match operand {
            Operand::WholeMatch | Operand::Capture(0) => self.matched,
            Operand::Capture(n) => self.captures.get(n - 1).copied().unwrap_or(""),
            Operand::StateParam(0) => self.state,
            Operand::StateParam(n) => self.state.split('.').nth(n - 1).unwrap_or(""),
        }
    }
}

/// Resolve a case table: first satisfied guard in declared order wins.
pub fn resolve<'g>(
    grammar: &CompiledGrammar,
    branches: &'g [CaseBranch],
    ctx: &MatchContext,
) -> Result<&'g TokenSpec, TokenizeError> {
    for branch in branches {
        if satisfied(grammar, &branch.guard, ctx) {
            return Ok(&branch.outcome);
        }
    }
    Err(TokenizeError::NoMatchingCase {
        state: ctx.state.to_string(),
        matched: ctx.matched.to_string(),
    })
}

fn satisfied(grammar: &CompiledGrammar, guard: &Guard, ctx: &MatchContext) -> bool {
    match guard {
        Guard::Default => true,
        Guard::Eos => ctx.eos,
        Guard::Expr { operand, test } => {
            let value = ctx.operand_text(*operand);
            match test {
                GuardTest::Eq(rhs) => equals(grammar, value, &rhs.expand(&ctx.substitution())),
                GuardTest::Ne(rhs) => !equals(grammar, value, &rhs.expand(&ctx.substitution())),
                GuardTest::In(set) => grammar.set_contains(set, value),
                GuardTest::NotIn(set) => !grammar.set_contains(set, value),
                GuardTest::Matches(rhs) => matches_pattern(grammar, value, rhs, ctx),
                GuardTest::NotMatches(rhs) => !matches_pattern(grammar, value, rhs, ctx),
            }
        }
    }
}

fn equals(grammar: &CompiledGrammar, left: &str, right: &str) -> bool {
    if grammar.ignore_case {
        // Same folding the compiler uses when interning symbol sets.
        left.to_lowercase() == right.to_lowercase()
    } else {
        left == right
    }
}

fn matches_pattern(
    grammar: &CompiledGrammar,
    value: &str,
    rhs: &PatternRhs,
    ctx: &MatchContext,
) -> bool {
    match rhs {
        PatternRhs::Static(regex) => regex.is_match(value),
        PatternRhs::Dynamic(template) => {
            let source = template.expand(&ctx.substitution());
            match RegexBuilder::new(&format!("^(?:{})$", source))
                .case_insensitive(grammar.ignore_case)
                .build()
            {
                Ok(regex) => regex.is_match(value),
                Err(err) => {
                    log::warn!("dynamic guard pattern '{}' failed to compile: {}", source, err);
                    false
                }
            }
        }
    }
}
