// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use thiserror::Error;

use crate::filter::FilterClass;


/// An error generating the entries for a single rule.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RuleError {
  /// A filter referred to a constant that is not defined.
  #[error("failed to resolve const '{name}' in '{class}' clause")]
  UnresolvedConstant {
    /// The name of the missing constant.
    name: String,
    /// The condition class the reference was used in.
    class: FilterClass,
  },
  /// The rule's conditions did not produce a single filter.
  #[error("at least one filter has to be specified")]
  EmptyFilterSet,
  /// The rule's actions did not produce a single property.
  #[error("at least one action has to be specified")]
  EmptyActionSet,
  /// The rule asks for a category that does not exist.
  #[error("unrecognized category '{0}'")]
  UnknownCategory(String),
}


/// The stage of rule generation that failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
  Filters,
  Actions,
}

impl Display for Stage {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    let s = match self {
      Self::Filters => "error generating filters",
      Self::Actions => "error generating actions",
    };
    f.write_str(s)
  }
}


/// An error generating entries for a configuration, annotated with the
/// rule it originated from.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("failed to generate rule #{index}: {stage}")]
pub struct GenerateError {
  /// The zero-based index of the failing rule.
  pub index: usize,
  /// The stage that failed.
  pub stage: Stage,
  /// The underlying problem.
  #[source]
  pub kind: RuleError,
}
