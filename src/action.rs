// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::str::FromStr;

use crate::config::Actions;
use crate::error::RuleError;
use crate::property::Property;
use crate::property::PropertyName;
use crate::property::SmartLabel;


/// A category to file messages under.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
  Personal,
  Social,
  Updates,
  Forums,
  Promotions,
}

impl Category {
  /// Map the category to the smart label the provider uses for it.
  pub fn smart_label(&self) -> SmartLabel {
    match self {
      Self::Personal => SmartLabel::Personal,
      Self::Social => SmartLabel::Social,
      Self::Updates => SmartLabel::Notification,
      Self::Forums => SmartLabel::Group,
      Self::Promotions => SmartLabel::Promo,
    }
  }
}

impl FromStr for Category {
  type Err = RuleError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "personal" => Ok(Self::Personal),
      "social" => Ok(Self::Social),
      "updates" => Ok(Self::Updates),
      "forums" => Ok(Self::Forums),
      "promotions" => Ok(Self::Promotions),
      _ => Err(RuleError::UnknownCategory(s.to_string())),
    }
  }
}


/// Generate the action properties of a rule.
pub(crate) fn generate_actions(actions: &Actions) -> Result<Vec<Property>, RuleError> {
  let Actions {
    archive,
    delete,
    mark_read,
    mark_important,
    category,
    labels,
  } = actions;

  let mut properties = [
    (*archive, PropertyName::ShouldArchive),
    (*delete, PropertyName::ShouldTrash),
    (*mark_important, PropertyName::ShouldAlwaysMarkAsImportant),
    (*mark_read, PropertyName::ShouldMarkAsRead),
  ]
  .into_iter()
  .filter_map(|(enabled, name)| enabled.then(|| Property::flag(name)))
  .collect::<Vec<_>>();

  if let Some(category) = category {
    let label = category.parse::<Category>()?.smart_label();
    let () = properties.push(Property::new(
      PropertyName::SmartLabelToApply,
      label.to_property_value(),
    ));
  }

  let () = properties.extend(
    labels
      .iter()
      .map(|label| Property::new(PropertyName::Label, label.as_str())),
  );

  if properties.is_empty() {
    return Err(RuleError::EmptyActionSet)
  }
  Ok(properties)
}
