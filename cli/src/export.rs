// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::borrow::Cow;

use mailfilter::Entry;


const INDENT: &str = "  ";


/// The author to record in an exported feed.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Author<'input> {
  pub name: Option<&'input str>,
  pub email: Option<&'input str>,
}

impl Author<'_> {
  fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none()
  }
}


/// Escape characters with special meaning in XML.
fn escape_xml(s: &str) -> Cow<'_, str> {
  if !s.contains(['&', '<', '>', '\'', '"']) {
    return Cow::Borrowed(s)
  }

  let mut escaped = String::with_capacity(s.len() + 8);
  for c in s.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '\'' => escaped.push_str("&apos;"),
      '"' => escaped.push_str("&quot;"),
      c => escaped.push(c),
    }
  }
  Cow::Owned(escaped)
}


fn write_author(author: &Author<'_>, output: &mut String) {
  if author.is_empty() {
    return
  }

  let () = output.push_str(&format!("{INDENT}<author>\n"));
  if let Some(name) = author.name {
    let () = output.push_str(&format!(
      "{INDENT}{INDENT}<name>{}</name>\n",
      escape_xml(name)
    ));
  }
  if let Some(email) = author.email {
    let () = output.push_str(&format!(
      "{INDENT}{INDENT}<email>{}</email>\n",
      escape_xml(email)
    ));
  }
  let () = output.push_str(&format!("{INDENT}</author>\n"));
}


fn write_entry(entry: &Entry, output: &mut String) {
  let () = output.push_str(&format!("{INDENT}<entry>\n"));
  let () = output.push_str(&format!("{INDENT}{INDENT}<category term='filter'></category>\n"));
  let () = output.push_str(&format!("{INDENT}{INDENT}<title>Mail Filter</title>\n"));
  let () = output.push_str(&format!("{INDENT}{INDENT}<content></content>\n"));
  for property in entry {
    let () = output.push_str(&format!(
      "{INDENT}{INDENT}<apps:property name='{}' value='{}'/>\n",
      property.name,
      escape_xml(&property.value)
    ));
  }
  let () = output.push_str(&format!("{INDENT}</entry>\n"));
}


/// Serialize the provided entries into a filter feed that can be
/// imported by the mail provider.
pub(crate) fn to_xml(entries: &[Entry], author: &Author<'_>) -> String {
  let mut output = String::new();
  let () = output.push_str("<?xml version='1.0' encoding='UTF-8'?>\n");
  let () = output.push_str(
    "<feed xmlns='http://www.w3.org/2005/Atom' xmlns:apps='http://schemas.google.com/apps/2006'>\n",
  );
  let () = output.push_str(&format!("{INDENT}<title>Mail Filters</title>\n"));
  let () = write_author(author, &mut output);

  for entry in entries {
    let () = write_entry(entry, &mut output);
  }

  let () = output.push_str("</feed>\n");
  output
}


#[cfg(test)]
mod tests {
  use super::*;

  use mailfilter::Property;
  use mailfilter::PropertyName;


  /// Check that special characters get escaped.
  #[test]
  fn escaping() {
    assert_eq!(escape_xml("a@b.com"), "a@b.com");
    assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
    assert_eq!(
      escape_xml(r#"{"a b" <c>} & 'd'"#),
      "{&quot;a b&quot; &lt;c&gt;} &amp; &apos;d&apos;"
    );
  }

  /// Check that we produce the expected feed for a set of entries.
  #[test]
  fn feed() {
    let entries = [
      Entry(vec![
        Property::new(PropertyName::From, "{a@b.com \"c d\"}"),
        Property::new(PropertyName::Label, "work"),
      ]),
      Entry(vec![
        Property::new(PropertyName::From, "{a@b.com \"c d\"}"),
        Property::new(PropertyName::ShouldArchive, "true"),
      ]),
    ];
    let author = Author {
      name: Some("Jane"),
      email: Some("jane@example.com"),
    };

    let xml = to_xml(&entries, &author);
    let expected = r#"<?xml version='1.0' encoding='UTF-8'?>
<feed xmlns='http://www.w3.org/2005/Atom' xmlns:apps='http://schemas.google.com/apps/2006'>
  <title>Mail Filters</title>
  <author>
    <name>Jane</name>
    <email>jane@example.com</email>
  </author>
  <entry>
    <category term='filter'></category>
    <title>Mail Filter</title>
    <content></content>
    <apps:property name='from' value='{a@b.com &quot;c d&quot;}'/>
    <apps:property name='label' value='work'/>
  </entry>
  <entry>
    <category term='filter'></category>
    <title>Mail Filter</title>
    <content></content>
    <apps:property name='from' value='{a@b.com &quot;c d&quot;}'/>
    <apps:property name='shouldArchive' value='true'/>
  </entry>
</feed>
"#;
    assert_eq!(xml, expected);
  }

  /// Check that the author is omitted when not provided.
  #[test]
  fn feed_without_author() {
    let xml = to_xml(&[], &Author::default());
    assert!(!xml.contains("<author>"));
    assert!(xml.ends_with("<title>Mail Filters</title>\n</feed>\n"));
  }
}
