//! A data-driven [`Screen`] built from declarative items.
//!
//! Useful for fixed menus (mod settings, help topics) and as the fixture
//! screen in tests: all content is owned by the screen itself, so `refresh`
//! is a no-op and no host context is consulted.

use std::collections::HashMap;

use crate::domain::{CommandToken, Result};
use crate::grid::GridModel;
use crate::screens::{Capabilities, Screen, Section};

/// One declarative item of a [`StaticScreen`].
#[derive(Debug, Clone)]
pub struct StaticItem {
    name: String,
    summary: String,
    detail: String,
    sections: Vec<Section>,
    command: Option<CommandToken>,
    grid: Option<GridModel>,
}

impl StaticItem {
    /// Creates an item whose summary defaults to its name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            summary: name.clone(),
            name,
            detail: String::new(),
            sections: Vec::new(),
            command: None,
            grid: None,
        }
    }

    /// Overrides the spoken summary line.
    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Sets the detail text read on demand.
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Appends a drill-down section.
    #[must_use]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Sets the activation command for a sectionless item.
    #[must_use]
    pub fn command(mut self, command: CommandToken) -> Self {
        self.command = Some(command);
        self
    }

    /// Marks the item as a composite grid.
    #[must_use]
    pub fn grid(mut self, grid: GridModel) -> Self {
        self.grid = Some(grid);
        self
    }
}

/// A [`Screen`] whose items are fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StaticScreen {
    name: String,
    description: String,
    capabilities: Capabilities,
    items: Vec<StaticItem>,
    secondary: HashMap<String, Vec<Section>>,
}

impl StaticScreen {
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Declares the screen's capability set.
    #[must_use]
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Appends an item. Insertion order is traversal order.
    #[must_use]
    pub fn item(mut self, item: StaticItem) -> Self {
        self.items.push(item);
        self
    }

    /// Registers the nested sections behind a secondary id.
    #[must_use]
    pub fn secondary(mut self, id: impl Into<String>, sections: Vec<Section>) -> Self {
        self.secondary.insert(id.into(), sections);
        self
    }
}

impl<H> Screen<H> for StaticScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn refresh(&mut self, _ctx: &H) -> Result<()> {
        Ok(())
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_summary(&self, _ctx: &H, index: usize) -> Result<String> {
        Ok(self
            .items
            .get(index)
            .map_or_else(|| "Invalid item".to_string(), |item| item.summary.clone()))
    }

    fn item_detail(&self, ctx: &H, index: usize) -> Result<String> {
        match self.items.get(index) {
            Some(item) if !item.detail.is_empty() => Ok(item.detail.clone()),
            _ => self.item_summary(ctx, index),
        }
    }

    fn sortable_name(&self, _ctx: &H, index: usize) -> Result<String> {
        Ok(self
            .items
            .get(index)
            .map_or_else(String::new, |item| item.name.clone()))
    }

    fn sections_for_item(&self, _ctx: &H, index: usize) -> Result<Vec<Section>> {
        Ok(self
            .items
            .get(index)
            .map_or_else(Vec::new, |item| item.sections.clone()))
    }

    fn item_command(&self, _ctx: &H, index: usize) -> Option<CommandToken> {
        self.items.get(index).and_then(|item| item.command.clone())
    }

    fn grid_for_item(&self, _ctx: &H, index: usize) -> Result<Option<GridModel>> {
        Ok(self.items.get(index).and_then(|item| item.grid.clone()))
    }

    fn sections_for_secondary(&self, _ctx: &H, id: &str) -> Result<Vec<Section>> {
        Ok(self.secondary.get(id).cloned().unwrap_or_default())
    }
}
