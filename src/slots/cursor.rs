//! The slot cursor: container/child traversal over live UI elements.
//!
//! A secondary, independent navigation mode used as a manual accessibility
//! aid when the data tree has no reading for what is on screen. Two nested
//! levels — discovered containers and, once drilled in, their interactive
//! children — with a flat single-level fallback when the surface exposes no
//! containers. Movement auto-advances across container boundaries so the
//! whole surface is one wrapping traversal.

use crate::domain::CommandToken;
use crate::slots::element::{ElementKind, UiContainer, UiElement, UiSurface};

/// Whether the cursor sits on containers or inside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLevel {
    Containers,
    Children,
}

#[derive(Debug)]
struct ContainerGroup {
    container: UiContainer,
    children: Vec<UiElement>,
}

#[derive(Debug, Default)]
enum Discovery {
    #[default]
    Empty,
    Flat(Vec<UiElement>),
    Grouped(Vec<ContainerGroup>),
}

/// Cursor state over the discovered surface.
#[derive(Debug, Default)]
pub struct SlotCursor {
    enabled: bool,
    surface_id: Option<String>,
    discovery: Discovery,
    level: SlotLevel,
    container_index: usize,
    child_index: usize,
}

impl Default for SlotLevel {
    fn default() -> Self {
        Self::Containers
    }
}

impl SlotCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the cursor on or off, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Re-discovers the element list when the active surface changed
    /// identity since the last tick. Returns whether a rediscovery ran.
    pub fn sync(&mut self, surface: &dyn UiSurface) -> bool {
        let id = surface.surface_id();
        if self.surface_id.as_deref() == Some(id) {
            return false;
        }
        tracing::debug!(surface = id, "slot cursor rediscovering surface");
        self.surface_id = Some(id.to_string());
        self.discovery = discover(surface);
        self.container_index = 0;
        self.child_index = 0;
        self.level = match self.discovery {
            Discovery::Grouped(_) => SlotLevel::Containers,
            _ => SlotLevel::Children,
        };
        true
    }

    /// Forces rediscovery on the next [`sync`](Self::sync).
    pub fn invalidate(&mut self) {
        self.surface_id = None;
    }

    /// Moves forward, auto-advancing to the sibling container at a child
    /// list boundary and wrapping at the end of the surface.
    pub fn move_next(&mut self) -> bool {
        match (&self.discovery, self.level) {
            (Discovery::Empty, _) => false,
            (Discovery::Flat(elements), _) => {
                if elements.is_empty() {
                    return false;
                }
                self.child_index = (self.child_index + 1) % elements.len();
                true
            }
            (Discovery::Grouped(groups), SlotLevel::Containers) => {
                self.container_index = (self.container_index + 1) % groups.len();
                true
            }
            (Discovery::Grouped(groups), SlotLevel::Children) => {
                let children = groups[self.container_index].children.len();
                if self.child_index + 1 < children {
                    self.child_index += 1;
                } else {
                    // Boundary: advance to the next container's first child.
                    self.container_index = (self.container_index + 1) % groups.len();
                    self.child_index = 0;
                }
                true
            }
        }
    }

    /// Moves backward, mirroring [`move_next`](Self::move_next).
    pub fn move_previous(&mut self) -> bool {
        match (&self.discovery, self.level) {
            (Discovery::Empty, _) => false,
            (Discovery::Flat(elements), _) => {
                if elements.is_empty() {
                    return false;
                }
                self.child_index = wrap_back(self.child_index, elements.len());
                true
            }
            (Discovery::Grouped(groups), SlotLevel::Containers) => {
                self.container_index = wrap_back(self.container_index, groups.len());
                true
            }
            (Discovery::Grouped(groups), SlotLevel::Children) => {
                if self.child_index > 0 {
                    self.child_index -= 1;
                } else {
                    self.container_index = wrap_back(self.container_index, groups.len());
                    self.child_index = groups[self.container_index]
                        .children
                        .len()
                        .saturating_sub(1);
                }
                true
            }
        }
    }

    /// Enters the current container's children. No-op in flat mode or when
    /// the container has no children.
    pub fn drill_down(&mut self) -> bool {
        let Discovery::Grouped(groups) = &self.discovery else {
            return false;
        };
        if self.level == SlotLevel::Children {
            return false;
        }
        if groups[self.container_index].children.is_empty() {
            return false;
        }
        self.child_index = 0;
        self.level = SlotLevel::Children;
        true
    }

    /// Returns to the container level. `false` when already there or flat.
    pub fn back_out(&mut self) -> bool {
        if let Discovery::Grouped(_) = &self.discovery {
            if self.level == SlotLevel::Children {
                self.level = SlotLevel::Containers;
                return true;
            }
        }
        false
    }

    /// Jumps the cursor to the nth entry at the current level (0-based).
    pub fn jump_to(&mut self, index: usize) -> bool {
        match (&self.discovery, self.level) {
            (Discovery::Flat(elements), _) if index < elements.len() => {
                self.child_index = index;
                true
            }
            (Discovery::Grouped(groups), SlotLevel::Containers) if index < groups.len() => {
                self.container_index = index;
                true
            }
            (Discovery::Grouped(groups), SlotLevel::Children)
                if index < groups[self.container_index].children.len() =>
            {
                self.child_index = index;
                true
            }
            _ => false,
        }
    }

    /// The element under the cursor, when the cursor is on one.
    #[must_use]
    pub fn current_element(&self) -> Option<&UiElement> {
        match (&self.discovery, self.level) {
            (Discovery::Flat(elements), _) => elements.get(self.child_index),
            (Discovery::Grouped(groups), SlotLevel::Children) => groups
                .get(self.container_index)?
                .children
                .get(self.child_index),
            _ => None,
        }
    }

    /// The container under the cursor, at the container level.
    #[must_use]
    pub fn current_container(&self) -> Option<&UiContainer> {
        match (&self.discovery, self.level) {
            (Discovery::Grouped(groups), SlotLevel::Containers) => {
                groups.get(self.container_index).map(|g| &g.container)
            }
            _ => None,
        }
    }

    /// Synthetic event token for the current element: click for buttons and
    /// regions, toggle for toggles, hover for everything else.
    #[must_use]
    pub fn activate(&self) -> Option<CommandToken> {
        let element = self.current_element()?;
        let verb = match element.kind {
            ElementKind::Button | ElementKind::Region | ElementKind::Slider => "ui.click",
            ElementKind::Toggle => "ui.toggle",
            ElementKind::Label => "ui.hover",
        };
        Some(CommandToken::with_target(verb, &element.id))
    }

    /// Spoken line for the current position.
    #[must_use]
    pub fn spoken_current(&self) -> String {
        if let Some(element) = self.current_element() {
            return format!("{}, {}", element.label, element.kind.spoken());
        }
        if let Some(container) = self.current_container() {
            let count = match &self.discovery {
                Discovery::Grouped(groups) => groups[self.container_index].children.len(),
                _ => 0,
            };
            return match count {
                0 => format!("{} panel, empty", container.label),
                1 => format!("{} panel, 1 control", container.label),
                n => format!("{} panel, {n} controls", container.label),
            };
        }
        "No elements".to_string()
    }

    /// Longer readout, preferring the host's element detail.
    #[must_use]
    pub fn read_detail(&self, surface: &dyn UiSurface) -> String {
        self.current_element()
            .and_then(|element| surface.element_detail(&element.id))
            .unwrap_or_else(|| self.spoken_current())
    }

    /// Spoken enumeration of everything at the current level.
    #[must_use]
    pub fn spoken_overview(&self) -> String {
        let labels: Vec<&str> = match (&self.discovery, self.level) {
            (Discovery::Empty, _) => Vec::new(),
            (Discovery::Flat(elements), _) => {
                elements.iter().map(|e| e.label.as_str()).collect()
            }
            (Discovery::Grouped(groups), SlotLevel::Containers) => {
                groups.iter().map(|g| g.container.label.as_str()).collect()
            }
            (Discovery::Grouped(groups), SlotLevel::Children) => groups
                .get(self.container_index)
                .map(|g| g.children.iter().map(|e| e.label.as_str()).collect())
                .unwrap_or_default(),
        };
        match labels.len() {
            0 => "No elements".to_string(),
            1 => format!("1 element: {}", labels[0]),
            n => format!("{n} elements: {}", labels.join(", ")),
        }
    }
}

fn wrap_back(index: usize, count: usize) -> usize {
    if index == 0 {
        count - 1
    } else {
        index - 1
    }
}

/// Reads the surface once and builds the traversal structure.
///
/// Containers and children are sorted by reading order. When the surface
/// exposes no containers, all interactive elements form one flat list.
/// Elements naming a container that was not discovered fold into the flat
/// handling only when no containers exist at all; otherwise they are
/// dropped, since the host's grouping is authoritative.
fn discover(surface: &dyn UiSurface) -> Discovery {
    let mut elements: Vec<UiElement> = surface
        .elements()
        .into_iter()
        .filter(|element| element.interactive)
        .collect();
    elements.sort_by(|a, b| a.pos.cmp_reading_order(&b.pos));

    let mut containers = surface.containers();
    if containers.is_empty() {
        return if elements.is_empty() {
            Discovery::Empty
        } else {
            Discovery::Flat(elements)
        };
    }
    containers.sort_by(|a, b| a.pos.cmp_reading_order(&b.pos));

    let mut groups: Vec<ContainerGroup> = containers
        .into_iter()
        .map(|container| ContainerGroup {
            container,
            children: Vec::new(),
        })
        .collect();
    for element in elements {
        let Some(owner) = element.container.as_deref() else {
            continue;
        };
        if let Some(group) = groups.iter_mut().find(|g| g.container.id == owner) {
            group.children.push(element);
        }
    }
    Discovery::Grouped(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::element::SlotPos;

    struct FakeSurface {
        id: String,
        containers: Vec<UiContainer>,
        elements: Vec<UiElement>,
    }

    impl UiSurface for FakeSurface {
        fn surface_id(&self) -> &str {
            &self.id
        }

        fn containers(&self) -> Vec<UiContainer> {
            self.containers.clone()
        }

        fn elements(&self) -> Vec<UiElement> {
            self.elements.clone()
        }

        fn element_detail(&self, id: &str) -> Option<String> {
            (id == "save").then(|| "Saves the current game".to_string())
        }
    }

    fn element(id: &str, x: f32, y: f32, container: Option<&str>) -> UiElement {
        UiElement {
            id: id.to_string(),
            label: id.to_string(),
            kind: ElementKind::Button,
            pos: SlotPos::new(x, y),
            container: container.map(str::to_string),
            interactive: true,
        }
    }

    fn flat_surface() -> FakeSurface {
        FakeSurface {
            id: "main".to_string(),
            containers: vec![],
            elements: vec![
                element("c", 0.0, 20.0, None),
                element("a", 0.0, 0.0, None),
                element("d", 10.0, 20.0, None),
                element("b", 10.0, 0.0, None),
            ],
        }
    }

    fn grouped_surface() -> FakeSurface {
        FakeSurface {
            id: "panel".to_string(),
            containers: vec![
                UiContainer {
                    id: "top".to_string(),
                    label: "Header".to_string(),
                    pos: SlotPos::new(0.0, 0.0),
                },
                UiContainer {
                    id: "bottom".to_string(),
                    label: "Footer".to_string(),
                    pos: SlotPos::new(0.0, 100.0),
                },
            ],
            elements: vec![
                element("save", 0.0, 101.0, Some("bottom")),
                element("load", 10.0, 101.0, Some("bottom")),
                element("title", 0.0, 1.0, Some("top")),
            ],
        }
    }

    #[test]
    fn flat_fallback_wraps_after_count_moves() {
        let mut cursor = SlotCursor::new();
        cursor.sync(&flat_surface());
        let first = cursor.current_element().unwrap().id.clone();
        assert_eq!(first, "a");
        for _ in 0..4 {
            assert!(cursor.move_next());
        }
        assert_eq!(cursor.current_element().unwrap().id, first);
    }

    #[test]
    fn discovery_orders_by_reading_position() {
        let mut cursor = SlotCursor::new();
        cursor.sync(&flat_surface());
        let mut seen = vec![cursor.current_element().unwrap().id.clone()];
        for _ in 0..3 {
            cursor.move_next();
            seen.push(cursor.current_element().unwrap().id.clone());
        }
        assert_eq!(seen, ["a", "b", "c", "d"]);
    }

    #[test]
    fn sync_is_idempotent_for_the_same_surface() {
        let mut cursor = SlotCursor::new();
        let surface = flat_surface();
        assert!(cursor.sync(&surface));
        cursor.move_next();
        assert!(!cursor.sync(&surface));
        assert_eq!(cursor.current_element().unwrap().id, "b");
    }

    #[test]
    fn surface_change_triggers_rediscovery() {
        let mut cursor = SlotCursor::new();
        cursor.sync(&flat_surface());
        cursor.move_next();
        assert!(cursor.sync(&grouped_surface()));
        assert_eq!(cursor.current_container().unwrap().label, "Header");
    }

    #[test]
    fn child_boundary_advances_to_sibling_container() {
        let mut cursor = SlotCursor::new();
        cursor.sync(&grouped_surface());
        assert!(cursor.drill_down());
        assert_eq!(cursor.current_element().unwrap().id, "title");
        cursor.move_next();
        // Header has one child; next lands on Footer's first child.
        assert_eq!(cursor.current_element().unwrap().id, "save");
        cursor.move_previous();
        assert_eq!(cursor.current_element().unwrap().id, "title");
    }

    #[test]
    fn back_out_returns_to_containers_only_when_grouped() {
        let mut cursor = SlotCursor::new();
        cursor.sync(&grouped_surface());
        cursor.drill_down();
        assert!(cursor.back_out());
        assert!(!cursor.back_out());

        let mut flat = SlotCursor::new();
        flat.sync(&flat_surface());
        assert!(!flat.back_out());
    }

    #[test]
    fn activation_tokens_carry_the_element_id() {
        let mut cursor = SlotCursor::new();
        cursor.sync(&flat_surface());
        let token = cursor.activate().unwrap();
        assert_eq!(token.as_str(), "ui.click a");
    }

    #[test]
    fn spoken_lines_cover_elements_containers_and_empty() {
        let mut cursor = SlotCursor::new();
        assert_eq!(cursor.spoken_current(), "No elements");
        cursor.sync(&grouped_surface());
        assert_eq!(cursor.spoken_current(), "Header panel, 1 control");
        cursor.drill_down();
        assert_eq!(cursor.spoken_current(), "title, button");
    }

    #[test]
    fn read_detail_prefers_host_detail() {
        let mut cursor = SlotCursor::new();
        let surface = grouped_surface();
        cursor.sync(&surface);
        cursor.move_next();
        cursor.drill_down();
        assert_eq!(cursor.read_detail(&surface), "Saves the current game");
    }
}
