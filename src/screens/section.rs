//! Section and section-item model.
//!
//! A [`Section`] is a named, ordered group of detail/action entries under a
//! drilled-into item. Sections are built incrementally by the owning screen;
//! insertion order is significant because it is the order the user hears and
//! traverses. A section with zero items is valid and simply announces
//! "no items" when entered.

use serde::{Deserialize, Serialize};

use crate::domain::CommandToken;

/// A leaf entry within a [`Section`].
///
/// Carries a summary line, an optional longer value string, an optional
/// detail text, and at most one activation command. An entry may also carry a
/// secondary identifier that lets the hosting screen resolve further nested
/// sections (the mechanism for drilling from, e.g., a ledger line into the
/// hab that generated it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionItem {
    summary: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<CommandToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary_id: Option<String>,
}

impl SectionItem {
    /// Creates an entry with only a summary line.
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            value: String::new(),
            detail: String::new(),
            command: None,
            secondary_id: None,
        }
    }

    /// Attaches a value string spoken after the summary.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Attaches a longer detail text, read on demand.
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Attaches an activation command.
    #[must_use]
    pub fn command(mut self, command: CommandToken) -> Self {
        self.command = Some(command);
        self
    }

    /// Attaches a secondary identifier enabling a further drill-down.
    #[must_use]
    pub fn secondary(mut self, id: impl Into<String>) -> Self {
        self.secondary_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn summary_text(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn detail_text(&self) -> &str {
        &self.detail
    }

    #[must_use]
    pub fn value_text(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn activation(&self) -> Option<&CommandToken> {
        self.command.as_ref()
    }

    #[must_use]
    pub fn secondary_id(&self) -> Option<&str> {
        self.secondary_id.as_deref()
    }

    /// The line spoken when the cursor lands on this entry.
    ///
    /// Summary and value joined as "summary: value"; just the summary when no
    /// value is set.
    #[must_use]
    pub fn spoken_line(&self) -> String {
        if self.value.is_empty() {
            self.summary.clone()
        } else {
            format!("{}: {}", self.summary, self.value)
        }
    }
}

/// A named, ordered collection of [`SectionItem`]s belonging to one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    name: String,
    items: Vec<SectionItem>,
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Appends an entry. Insertion order is traversal order.
    pub fn push(&mut self, item: SectionItem) {
        self.items.push(item);
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, item: SectionItem) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn items(&self) -> &[SectionItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&SectionItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line spoken when the cursor lands on this section.
    #[must_use]
    pub fn spoken_line(&self) -> String {
        match self.items.len() {
            0 => format!("{}. no items", self.name),
            1 => format!("{}. 1 item", self.name),
            n => format!("{}. {n} items", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spoken_line_joins_summary_and_value() {
        let item = SectionItem::new("Mission control").value("4");
        assert_eq!(item.spoken_line(), "Mission control: 4");
    }

    #[test]
    fn spoken_line_without_value_is_summary() {
        let item = SectionItem::new("Recruit candidate");
        assert_eq!(item.spoken_line(), "Recruit candidate");
    }

    #[test]
    fn empty_section_announces_no_items() {
        let section = Section::new("Organizations");
        assert!(section.is_empty());
        assert_eq!(section.spoken_line(), "Organizations. no items");
    }

    #[test]
    fn insertion_order_is_preserved() {
        let section = Section::new("Resources")
            .with(SectionItem::new("Money").value("120"))
            .with(SectionItem::new("Influence").value("3"))
            .with(SectionItem::new("Ops").value("7"));
        let names: Vec<_> = section
            .items()
            .iter()
            .map(SectionItem::summary_text)
            .collect();
        assert_eq!(names, ["Money", "Influence", "Ops"]);
        assert_eq!(section.spoken_line(), "Resources. 3 items");
    }
}
