// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

//! A library for translating declarative email rules into mail filter
//! definitions.
//!
//! Each [`Rule`] consists of match conditions and actions. It is
//! translated into one or more [`Entry`] objects, each being an ordered
//! list of name/value [`Property`] pairs that map directly onto the
//! mail provider's filter import format. Because an exported filter can
//! only carry a single label, a rule applying multiple labels results
//! in multiple entries sharing the same conditions.

#![allow(
  clippy::collapsible_else_if,
  clippy::collapsible_if,
  clippy::let_and_return,
  clippy::let_unit_value
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod action;
mod assemble;
mod config;
mod consts;
mod error;
mod filter;
mod property;

#[cfg(feature = "tracing")]
use tracing::debug;
#[cfg(feature = "tracing")]
use tracing::instrument;

pub use crate::action::Category;
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub use crate::config::load_config;
pub use crate::config::Actions;
pub use crate::config::Config;
pub use crate::config::Const;
pub use crate::config::Consts;
pub use crate::config::Filters;
pub use crate::config::MatchFilters;
pub use crate::config::Rule;
pub use crate::error::GenerateError;
pub use crate::error::RuleError;
pub use crate::error::Stage;
pub use crate::filter::join_or;
pub use crate::filter::FilterClass;
pub use crate::property::Entry;
pub use crate::property::Property;
pub use crate::property::PropertyName;
pub use crate::property::SmartLabel;

use crate::action::generate_actions;
use crate::assemble::combine_filters_actions;
use crate::filter::generate_filters;


/// Generate the entries for a single rule.
#[cfg_attr(feature = "tracing", instrument(level = "debug", skip(rule, consts)))]
fn generate_rule(
  index: usize,
  rule: &Rule,
  consts: &Consts,
) -> Result<Vec<Entry>, GenerateError> {
  let error = |stage, kind| GenerateError { index, stage, kind };

  let filters =
    generate_filters(&rule.filters, consts).map_err(|kind| error(Stage::Filters, kind))?;
  let actions = generate_actions(&rule.actions).map_err(|kind| error(Stage::Actions, kind))?;
  let entries = combine_filters_actions(&filters, &actions);

  #[cfg(feature = "tracing")]
  debug!(
    filters = filters.len(),
    actions = actions.len(),
    entries = entries.len(),
    "generated rule"
  );
  Ok(entries)
}


/// Translate a configuration into entries that map directly onto
/// exported mail filters.
///
/// Rules are processed in order and the entries of a rule precede
/// those of any later rule. Generation stops at the first rule that
/// fails, in which case no entries are returned.
#[cfg_attr(
  feature = "tracing",
  instrument(level = "debug", skip_all, fields(rules = config.rules.len()))
)]
pub fn generate_rules(config: &Config) -> Result<Vec<Entry>, GenerateError> {
  let Config { consts, rules } = config;

  let mut entries = Vec::new();
  for (index, rule) in rules.iter().enumerate() {
    let () = entries.extend(generate_rule(index, rule, consts)?);
  }
  Ok(entries)
}
