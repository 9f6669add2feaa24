// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::HashMap;
#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use anyhow::Context as _;
#[cfg(feature = "config")]
use anyhow::Result;

#[cfg(feature = "config")]
use serde::Deserialize;

#[cfg(feature = "config")]
use tokio::fs::read;


/// A named list of literal values that filters can refer to.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
pub struct Const {
  /// The values, in the order in which they were declared.
  #[cfg_attr(feature = "config", serde(default))]
  pub values: Vec<String>,
}

impl<S> FromIterator<S> for Const
where
  S: Into<String>,
{
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = S>,
  {
    Self {
      values: iter.into_iter().map(S::into).collect(),
    }
  }
}


/// The mapping from constant name to constant.
pub type Consts = HashMap<String, Const>;


/// The four classes of match conditions, each a list of patterns of
/// which any may match.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MatchFilters {
  /// Patterns matching the sender.
  pub from: Vec<String>,
  /// Patterns matching the recipient.
  pub to: Vec<String>,
  /// Patterns matching the subject.
  pub subject: Vec<String>,
  /// Words contained anywhere in the message.
  pub has: Vec<String>,
}

impl MatchFilters {
  pub fn is_empty(&self) -> bool {
    self.from.is_empty() && self.to.is_empty() && self.subject.is_empty() && self.has.is_empty()
  }
}


/// The match conditions of a rule.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
pub struct Filters {
  /// Conditions using literal patterns.
  #[cfg_attr(feature = "config", serde(flatten))]
  pub literal: MatchFilters,
  /// Conditions referring to constants by name.
  #[cfg_attr(feature = "config", serde(default))]
  pub consts: MatchFilters,
}


/// The actions to apply to messages matching a rule.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default, rename_all = "camelCase"))]
pub struct Actions {
  pub archive: bool,
  pub delete: bool,
  pub mark_read: bool,
  pub mark_important: bool,
  /// The name of the category to file messages under, if any.
  ///
  /// The name is only checked when actions are generated, so that an
  /// unknown category is reported along with the offending rule.
  pub category: Option<String>,
  /// The labels to apply, in order.
  pub labels: Vec<String>,
}


/// A single rule: a set of conditions and the actions to apply when
/// they match.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct Rule {
  pub filters: Filters,
  pub actions: Actions,
}


/// The complete rule configuration.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct Config {
  /// Named constants, referred to by rules.
  pub consts: Consts,
  /// The rules, in the order they are to be exported.
  pub rules: Vec<Rule>,
}

#[cfg(feature = "config")]
impl Config {
  /// Parse a configuration from its JSON representation.
  pub fn from_json(data: &[u8]) -> Result<Self> {
    serde_json::from_slice(data).context("failed to parse configuration as JSON")
  }
}


/// Load a JSON configuration from the file at `path`.
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub async fn load_config(path: &Path) -> Result<Config> {
  let data = read(path)
    .await
    .with_context(|| format!("failed to read configuration file `{}`", path.display()))?;
  let config = Config::from_json(&data)
    .with_context(|| format!("failed to parse `{}` contents", path.display()))?;
  Ok(config)
}
