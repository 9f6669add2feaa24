// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::property::Entry;
use crate::property::Property;


/// Combine filter and action properties into exported entries.
///
/// An exported entry may carry only a single label. Every label after
/// the first one seen in the current entry closes that entry and starts
/// a new one, seeded with a fresh copy of the filters. Non-label
/// actions stay with the entry they were encountered in and are not
/// repeated.
pub(crate) fn combine_filters_actions(filters: &[Property], actions: &[Property]) -> Vec<Entry> {
  let mut entries = Vec::new();
  let mut current = Entry::seeded(filters);
  let mut has_label = false;

  for action in actions {
    if action.is_label() {
      if has_label {
        let () = entries.push(current);
        current = Entry::seeded(filters);
      }
      has_label = true;
    }
    let () = current.0.push(action.clone());
  }

  // The last entry is emitted even if it did not receive a label.
  let () = entries.push(current);
  entries
}
