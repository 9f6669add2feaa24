// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::config::Consts;
use crate::config::MatchFilters;
use crate::error::RuleError;
use crate::filter::FilterClass;


/// Expand a list of constant references into the concatenation of the
/// referenced constants' values.
pub(crate) fn resolve_consts<S>(
  references: &[S],
  consts: &Consts,
  class: FilterClass,
) -> Result<Vec<String>, RuleError>
where
  S: AsRef<str>,
{
  let mut resolved = Vec::new();
  for reference in references {
    let name = reference.as_ref();
    let constant = consts
      .get(name)
      .ok_or_else(|| RuleError::UnresolvedConstant {
        name: name.to_string(),
        class,
      })?;
    let () = resolved.extend(constant.values.iter().cloned());
  }
  Ok(resolved)
}


/// Resolve the constant references of each condition class of the
/// provided filters.
pub(crate) fn resolve_filters_consts(
  filters: &MatchFilters,
  consts: &Consts,
) -> Result<MatchFilters, RuleError> {
  let resolved = MatchFilters {
    from: resolve_consts(&filters.from, consts, FilterClass::From)?,
    to: resolve_consts(&filters.to, consts, FilterClass::To)?,
    subject: resolve_consts(&filters.subject, consts, FilterClass::Subject)?,
    has: resolve_consts(&filters.has, consts, FilterClass::Has)?,
  };
  Ok(resolved)
}


#[cfg(test)]
mod tests {
  use super::*;

  use crate::config::Const;


  fn consts() -> Consts {
    Consts::from([
      ("a".to_string(), Const::from_iter(["a1", "a2"])),
      ("b".to_string(), Const::from_iter(["b1"])),
    ])
  }

  /// Check that references are resolved in reference order and then in
  /// declaration order.
  #[test]
  fn resolve_in_order() {
    let consts = consts();
    let resolved = resolve_consts(&["b", "a"], &consts, FilterClass::From).unwrap();
    assert_eq!(resolved, vec!["b1", "a1", "a2"]);

    let resolved = resolve_consts::<&str>(&[], &consts, FilterClass::From).unwrap();
    assert!(resolved.is_empty());
  }

  /// Check that an unknown reference is reported without partial
  /// results.
  #[test]
  fn resolve_missing() {
    let consts = consts();
    let err = resolve_consts(&["a", "c", "b"], &consts, FilterClass::Subject).unwrap_err();
    assert_eq!(
      err,
      RuleError::UnresolvedConstant {
        name: "c".to_string(),
        class: FilterClass::Subject,
      }
    );
  }

  /// Check that each condition class is resolved independently.
  #[test]
  fn resolve_filters() {
    let consts = consts();
    let filters = MatchFilters {
      from: vec!["a".to_string()],
      has: vec!["b".to_string(), "b".to_string()],
      ..Default::default()
    };
    let resolved = resolve_filters_consts(&filters, &consts).unwrap();
    assert_eq!(resolved.from, vec!["a1", "a2"]);
    assert!(resolved.to.is_empty());
    assert!(resolved.subject.is_empty());
    assert_eq!(resolved.has, vec!["b1", "b1"]);

    let filters = MatchFilters {
      to: vec!["x".to_string()],
      ..Default::default()
    };
    let err = resolve_filters_consts(&filters, &consts).unwrap_err();
    assert!(matches!(
      err,
      RuleError::UnresolvedConstant {
        class: FilterClass::To,
        ..
      }
    ));
  }
}
