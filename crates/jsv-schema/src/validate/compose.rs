//! Composition keywords, evaluated left to right in declaration order.
//!
//! - `not` passes when its schema fails; the inner failure is discarded.
//! - `all_of` stops at the first failing branch and wraps its failure.
//! - `any_of` stops at the first passing branch; if none pass the failure
//!   carries no branch detail.
//! - `one_of` evaluates every branch and passes only with exactly one match.
//!
//! Schema errors inside any branch abort validation; they are never
//! counted as a branch failing.

use jsv_core::Value;

use super::{Evaluator, Verdict};
use crate::error::SchemaError;
use crate::failure::Failure;
use crate::node::Keywords;
use crate::resolver::Scope;

impl<'a> Evaluator<'a> {
    pub(super) fn compose(
        &self,
        kw: &'a Keywords,
        value: &Value,
        scope: Scope<'a>,
        depth: usize,
    ) -> Result<Verdict, SchemaError> {
        if let Some(not) = &kw.not {
            if self.node(not, value, scope, depth)?.is_ok() {
                return Ok(Err(Failure::Not));
            }
        }

        for (at, branch) in kw.all_of.iter().enumerate() {
            if let Err(error) = self.node(branch, value, scope, depth)? {
                return Ok(Err(Failure::AllOf {
                    at,
                    error: Box::new(error),
                }));
            }
        }

        if !kw.any_of.is_empty() {
            let mut matched = false;
            for branch in &kw.any_of {
                if self.node(branch, value, scope, depth)?.is_ok() {
                    matched = true;
                    break;
                }
            }
            if !matched {
                return Ok(Err(Failure::AnyOf));
            }
        }

        if !kw.one_of.is_empty() {
            let mut matched = Vec::new();
            for (at, branch) in kw.one_of.iter().enumerate() {
                if self.node(branch, value, scope, depth)?.is_ok() {
                    matched.push(at);
                }
            }
            if matched.len() != 1 {
                return Ok(Err(Failure::OneOf { matched }));
            }
        }

        Ok(Ok(()))
    }
}
