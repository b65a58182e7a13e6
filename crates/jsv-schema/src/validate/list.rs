//! List keywords.
//!
//! `items` runs in one of two modes. A single schema applies to every
//! element; a tuple applies positionally and hands elements past its end to
//! `additional_items`. Outside tuple mode `additional_items` has no effect.
//! The first failing element ends the check and is reported by index.

use jsv_core::Value;

use super::{Evaluator, Verdict};
use crate::error::SchemaError;
use crate::failure::Failure;
use crate::node::{Additional, Items, ListKeywords};
use crate::resolver::Scope;

impl<'a> Evaluator<'a> {
    pub(super) fn list(
        &self,
        kw: &'a ListKeywords,
        items: &[Value],
        scope: Scope<'a>,
    ) -> Result<Verdict, SchemaError> {
        let count = items.len();
        if let Some(min_items) = kw.min_items {
            if count < min_items {
                return Ok(Err(Failure::TooFewItems { count, min_items }));
            }
        }
        if let Some(max_items) = kw.max_items {
            if count > max_items {
                return Ok(Err(Failure::TooManyItems { count, max_items }));
            }
        }

        match &kw.items {
            Some(Items::Each(node)) => {
                for (at, item) in items.iter().enumerate() {
                    if let Err(error) = self.element(node, item, scope)? {
                        return Ok(Err(Failure::at_item(at, error)));
                    }
                }
            }
            Some(Items::Tuple(nodes)) => {
                for (at, (node, item)) in nodes.iter().zip(items).enumerate() {
                    if let Err(error) = self.element(node, item, scope)? {
                        return Ok(Err(Failure::at_item(at, error)));
                    }
                }
                let extra = nodes.len();
                match &kw.additional_items {
                    Some(Additional::Allowed(false)) if count > extra => {
                        return Ok(Err(Failure::AdditionalItem { at: extra }));
                    }
                    Some(Additional::Schema(node)) => {
                        for (at, item) in items.iter().enumerate().skip(extra) {
                            if let Err(error) = self.element(node, item, scope)? {
                                return Ok(Err(Failure::at_item(at, error)));
                            }
                        }
                    }
                    _ => {}
                }
            }
            None => {}
        }

        if kw.unique_items {
            if let Some((at, duplicate_of)) = first_duplicate(items) {
                return Ok(Err(Failure::DuplicateItem { at, duplicate_of }));
            }
        }
        Ok(Ok(()))
    }
}

/// The first element equal to an earlier one, with that earlier index.
fn first_duplicate(items: &[Value]) -> Option<(usize, usize)> {
    items.iter().enumerate().skip(1).find_map(|(at, item)| {
        items[..at]
            .iter()
            .position(|earlier| earlier == item)
            .map(|duplicate_of| (at, duplicate_of))
    })
}
