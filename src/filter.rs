// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use crate::config::Consts;
use crate::config::Filters;
use crate::config::MatchFilters;
use crate::consts::resolve_filters_consts;
use crate::error::RuleError;
use crate::property::Property;
use crate::property::PropertyName;


/// A class of match conditions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterClass {
  From,
  To,
  Subject,
  Has,
}

impl FilterClass {
  /// The property a condition of this class maps to.
  fn property_name(&self) -> PropertyName {
    match self {
      Self::From => PropertyName::From,
      Self::To => PropertyName::To,
      Self::Subject => PropertyName::Subject,
      Self::Has => PropertyName::HasTheWord,
    }
  }
}

impl Display for FilterClass {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    let s = match self {
      Self::From => "from",
      Self::To => "to",
      Self::Subject => "subject",
      Self::Has => "has",
    };
    f.write_str(s)
  }
}


/// Quote a pattern if it contains a space.
fn quote(pattern: &str) -> Cow<'_, str> {
  if pattern.contains(' ') {
    Cow::Owned(format!("\"{pattern}\""))
  } else {
    Cow::Borrowed(pattern)
  }
}


/// Combine a list of patterns into a single expression matching any of
/// them.
///
/// A single pattern is used verbatim. Multiple patterns are wrapped in
/// braces and separated by spaces, with each pattern containing a space
/// being enclosed in double quotes, e.g., `{a@b.com "foo bar"}`.
pub fn join_or<S>(patterns: &[S]) -> String
where
  S: AsRef<str>,
{
  match patterns {
    [] => String::new(),
    [pattern] => pattern.as_ref().to_string(),
    patterns => {
      let inner = patterns
        .iter()
        .map(|pattern| quote(pattern.as_ref()))
        .collect::<Vec<_>>()
        .join(" ");
      format!("{{{inner}}}")
    },
  }
}


/// Generate one property for each non-empty condition class.
pub(crate) fn generate_match_filters(filters: &MatchFilters) -> Vec<Property> {
  [
    (FilterClass::From, &filters.from),
    (FilterClass::To, &filters.to),
    (FilterClass::Subject, &filters.subject),
    (FilterClass::Has, &filters.has),
  ]
  .into_iter()
  .filter(|(_, patterns)| !patterns.is_empty())
  .map(|(class, patterns)| Property::new(class.property_name(), join_or(patterns.as_slice())))
  .collect()
}


/// Generate the filter properties of a rule: literal conditions first,
/// followed by the ones referring to constants.
pub(crate) fn generate_filters(
  filters: &Filters,
  consts: &Consts,
) -> Result<Vec<Property>, RuleError> {
  let mut properties = generate_match_filters(&filters.literal);

  let resolved = resolve_filters_consts(&filters.consts, consts)?;
  let () = properties.extend(generate_match_filters(&resolved));

  if properties.is_empty() {
    return Err(RuleError::EmptyFilterSet)
  }
  Ok(properties)
}
