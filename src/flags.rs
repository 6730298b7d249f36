// src/flags.rs

//! Static flag mapping tables
//!
//! A table is an ordered list of rules. Each rule matches one literal input
//! token (including any embedded value, e.g. `--thread=pthread`) and says what
//! the delegate tool should receive in its place:
//!
//! - [`FlagAction::PassThrough`] - the token itself
//! - [`FlagAction::Rewrite`] - a different delegate flag
//! - [`FlagAction::Discard`] - nothing
//!
//! Matching is by exact string, so rule order never changes the outcome. A
//! token that matches no rule is rejected by the caller.

use std::fmt;

/// What to emit for a recognized input flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagAction {
    /// Forward the token unchanged
    PassThrough,
    /// Forward a different flag instead
    Rewrite(&'static str),
    /// Accept the token but forward nothing
    Discard,
}

impl fmt::Display for FlagAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => write!(f, "pass through"),
            Self::Rewrite(to) => write!(f, "-> {}", to),
            Self::Discard => write!(f, "discard"),
        }
    }
}

/// One entry of a mapping table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagRule {
    /// Literal input token
    pub input: &'static str,
    /// Action taken when the token is seen
    pub action: FlagAction,
}

impl FlagRule {
    pub const fn pass(input: &'static str) -> Self {
        Self {
            input,
            action: FlagAction::PassThrough,
        }
    }

    pub const fn rewrite(input: &'static str, to: &'static str) -> Self {
        Self {
            input,
            action: FlagAction::Rewrite(to),
        }
    }

    pub const fn discard(input: &'static str) -> Self {
        Self {
            input,
            action: FlagAction::Discard,
        }
    }

    /// Delegate flag produced by this rule, if any
    pub fn output(&self) -> Option<&'static str> {
        match self.action {
            FlagAction::PassThrough => Some(self.input),
            FlagAction::Rewrite(to) => Some(to),
            FlagAction::Discard => None,
        }
    }
}

/// Immutable mapping table, fixed at build time
#[derive(Debug, Clone, Copy)]
pub struct FlagTable {
    rules: &'static [FlagRule],
}

impl FlagTable {
    pub const fn new(rules: &'static [FlagRule]) -> Self {
        Self { rules }
    }

    /// Find the rule for an input token
    ///
    /// Returns `None` when the token is outside the table's vocabulary.
    pub fn classify(&self, token: &str) -> Option<&'static FlagRule> {
        self.rules.iter().find(|rule| rule.input == token)
    }

    /// All rules, in declaration order
    pub fn rules(&self) -> &'static [FlagRule] {
        self.rules
    }
}

const GPGME_RULE_LIST: &[FlagRule] = &[
    FlagRule::pass("--cflags"),
    FlagRule::pass("--libs"),
    FlagRule::pass("--modversion"),
    FlagRule::rewrite("--version", "--modversion"),
    FlagRule::discard("--thread=pthread"),
    FlagRule::rewrite("--prefix", "--variable=prefix"),
];

const GPG_ERROR_RULE_LIST: &[FlagRule] = &[
    FlagRule::pass("--cflags"),
    FlagRule::pass("--libs"),
    FlagRule::rewrite("--version", "--modversion"),
];

/// Table used by `gpgme-config`
pub static GPGME_RULES: FlagTable = FlagTable::new(GPGME_RULE_LIST);

/// Table used by `gpg-error-config`
pub static GPG_ERROR_RULES: FlagTable = FlagTable::new(GPG_ERROR_RULE_LIST);
