// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;


/// The name of a filter property, as understood by the mail provider's
/// filter import format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PropertyName {
  /// Match on the sender.
  From,
  /// Match on the recipient.
  To,
  /// Match on the subject line.
  Subject,
  /// Match on words anywhere in the message.
  HasTheWord,
  /// Exclude messages containing the given words.
  ///
  /// Negated filters are not generated yet; the name is kept so that
  /// the vocabulary is complete.
  DoesNotHaveTheWord,
  /// Always mark matching messages as important.
  ShouldAlwaysMarkAsImportant,
  /// Apply a user label.
  Label,
  /// Apply one of the provider's predefined categories.
  SmartLabelToApply,
  /// Move matching messages to the trash.
  ShouldTrash,
  /// Skip the inbox.
  ShouldArchive,
  /// Mark matching messages as read.
  ShouldMarkAsRead,
}

impl PropertyName {
  /// Retrieve the name as used in the exported filter definition.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::From => "from",
      Self::To => "to",
      Self::Subject => "subject",
      Self::HasTheWord => "hasTheWord",
      Self::DoesNotHaveTheWord => "doesNotHaveTheWord",
      Self::ShouldAlwaysMarkAsImportant => "shouldAlwaysMarkAsImportant",
      Self::Label => "label",
      Self::SmartLabelToApply => "smartLabelToApply",
      Self::ShouldTrash => "shouldTrash",
      Self::ShouldArchive => "shouldArchive",
      Self::ShouldMarkAsRead => "shouldMarkAsRead",
    }
  }
}

impl Display for PropertyName {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.write_str(self.as_str())
  }
}


/// A predefined label recognized by the mail provider.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SmartLabel {
  Personal,
  Group,
  Notification,
  Promo,
  Social,
}

impl SmartLabel {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Personal => "personal",
      Self::Group => "group",
      Self::Notification => "notification",
      Self::Promo => "promo",
      Self::Social => "social",
    }
  }

  /// Format the smart label the way it is expected as the value of a
  /// `smartLabelToApply` property.
  pub fn to_property_value(&self) -> String {
    format!("^smartlabel_{}", self.as_str())
  }
}


/// A single name/value pair of an exported filter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
  /// The name of the property.
  pub name: PropertyName,
  /// The value associated with it.
  pub value: String,
}

impl Property {
  pub fn new<V>(name: PropertyName, value: V) -> Self
  where
    V: Into<String>,
  {
    Self {
      name,
      value: value.into(),
    }
  }

  /// Create a property for a boolean action that is turned on.
  pub(crate) fn flag(name: PropertyName) -> Self {
    Self::new(name, "true")
  }

  #[inline]
  pub fn is_label(&self) -> bool {
    self.name == PropertyName::Label
  }
}


/// One exported filter, i.e., an ordered list of properties.
///
/// Multiple properties may share a name, which is why this is not a
/// map.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Entry(pub Vec<Property>);

impl Entry {
  /// Create a new entry seeded with a copy of the provided properties.
  pub(crate) fn seeded(properties: &[Property]) -> Self {
    Self(properties.to_vec())
  }

  pub fn properties(&self) -> &[Property] {
    &self.0
  }

  /// Retrieve the value of the first property with the given name.
  pub fn get(&self, name: PropertyName) -> Option<&str> {
    self
      .0
      .iter()
      .find(|property| property.name == name)
      .map(|property| property.value.as_str())
  }

  /// Count the label properties in this entry.
  pub fn label_count(&self) -> usize {
    self.0.iter().filter(|property| property.is_label()).count()
  }
}

impl IntoIterator for Entry {
  type Item = Property;
  type IntoIter = std::vec::IntoIter<Property>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl<'entry> IntoIterator for &'entry Entry {
  type Item = &'entry Property;
  type IntoIter = std::slice::Iter<'entry, Property>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}
