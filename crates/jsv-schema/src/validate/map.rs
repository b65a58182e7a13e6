//! Map keywords.
//!
//! Checks run in order: key counts, `keys` form, ambiguous keys, `required`,
//! `dependencies`, `properties`, `pattern_properties`,
//! `additional_properties`. Keys matched by `properties` are removed from
//! the remaining set before `pattern_properties` runs, and keys matched by
//! either are removed before `additional_properties` runs.
//!
//! ## Key Encodings
//!
//! Declared names match a [`Key::String`] or a [`Key::Symbol`] with the same
//! text. A map holding both encodings of one name is rejected with
//! `AmbiguousKey` before any name lookup happens.

use std::collections::{BTreeMap, BTreeSet};

use jsv_core::{Key, Value};

use super::{Evaluator, Verdict};
use crate::error::SchemaError;
use crate::failure::Failure;
use crate::node::{Additional, Dependency, KeyForm, MapKeywords};
use crate::resolver::Scope;

impl<'a> Evaluator<'a> {
    pub(super) fn map(
        &self,
        kw: &'a MapKeywords,
        entries: &BTreeMap<Key, Value>,
        whole: &Value,
        scope: Scope<'a>,
        depth: usize,
    ) -> Result<Verdict, SchemaError> {
        if let Err(failure) = shape(kw, entries) {
            return Ok(Err(failure));
        }

        for (property, dependency) in &kw.dependencies {
            if lookup(entries, property).is_none() {
                continue;
            }
            match dependency {
                Dependency::Keys(keys) => {
                    if let Some(missing) = keys.iter().find(|k| lookup(entries, k).is_none()) {
                        return Ok(Err(Failure::MissingDependency {
                            property: property.clone(),
                            dependency: missing.clone(),
                        }));
                    }
                }
                Dependency::Schema(node) => {
                    if let Err(error) = self.node(node, whole, scope, depth)? {
                        return Ok(Err(Failure::InvalidDependency {
                            property: property.clone(),
                            error: Box::new(error),
                        }));
                    }
                }
            }
        }

        let mut remaining: BTreeSet<&Key> = entries.keys().collect();

        for (name, node) in &kw.properties {
            let Some((key, value)) = lookup(entries, name) else {
                continue;
            };
            remaining.remove(key);
            if let Err(error) = self.element(node, value, scope)? {
                return Ok(Err(Failure::at_property(name, error)));
            }
        }

        if !kw.pattern_properties.is_empty() {
            let candidates: Vec<&Key> = remaining.iter().copied().collect();
            for (pattern, node) in &kw.pattern_properties {
                for key in &candidates {
                    if !pattern.is_match(key.as_str()) {
                        continue;
                    }
                    remaining.remove(*key);
                    if let Err(error) = self.element(node, &entries[*key], scope)? {
                        return Ok(Err(Failure::at_property(key.as_str(), error)));
                    }
                }
            }
        }

        match &kw.additional_properties {
            Some(Additional::Allowed(false)) if !remaining.is_empty() => {
                Ok(Err(Failure::AdditionalProperties {
                    properties: remaining.iter().map(|k| k.as_str().to_string()).collect(),
                }))
            }
            Some(Additional::Schema(node)) => {
                for key in remaining {
                    if let Err(error) = self.element(node, &entries[key], scope)? {
                        return Ok(Err(Failure::at_property(key.as_str(), error)));
                    }
                }
                Ok(Ok(()))
            }
            _ => Ok(Ok(())),
        }
    }
}

/// Checks that need no recursion: counts, key form, ambiguity, `required`.
fn shape(kw: &MapKeywords, entries: &BTreeMap<Key, Value>) -> Verdict {
    let count = entries.len();
    if let Some(min_properties) = kw.min_properties {
        if count < min_properties {
            return Err(Failure::TooFewProperties {
                count,
                min_properties,
            });
        }
    }
    if let Some(max_properties) = kw.max_properties {
        if count > max_properties {
            return Err(Failure::TooManyProperties {
                count,
                max_properties,
            });
        }
    }

    if let Some(expected) = kw.keys {
        let wrong = entries.keys().find(|key| match expected {
            KeyForm::Strings => key.is_symbol(),
            KeyForm::Symbols => !key.is_symbol(),
        });
        if let Some(key) = wrong {
            return Err(Failure::InvalidKeys {
                expected,
                key: key.as_str().to_string(),
            });
        }
    }

    if let Some(key) = entries
        .keys()
        .find(|key| key.is_symbol() && entries.contains_key(&Key::string(key.as_str())))
    {
        return Err(Failure::AmbiguousKey {
            key: key.as_str().to_string(),
        });
    }

    let missing: Vec<String> = kw
        .required
        .iter()
        .filter(|name| lookup(entries, name).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(Failure::MissingProperties {
            missing,
            required: kw.required.iter().cloned().collect(),
        });
    }
    Ok(())
}

/// Find `name` under either key encoding, string first.
fn lookup<'v>(entries: &'v BTreeMap<Key, Value>, name: &str) -> Option<(&'v Key, &'v Value)> {
    entries
        .get_key_value(&Key::string(name))
        .or_else(|| entries.get_key_value(&Key::symbol(name)))
}
