//! Live UI element model and the surface discovery contract.
//!
//! The slot cursor walks what is actually on screen, not the data tree. The
//! host integration layer implements [`UiSurface`] over its canvas; the
//! cursor only sees these snapshot values.

/// Screen position of an element, in host canvas units.
///
/// Traversal order is derived purely from position: top-to-bottom primary,
/// left-to-right secondary, so repeated discovery yields a stable order
/// absent actual UI changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SlotPos {
    pub x: f32,
    pub y: f32,
}

impl SlotPos {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Total ordering for traversal: row first, then column.
    #[must_use]
    pub fn cmp_reading_order(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .total_cmp(&other.y)
            .then(self.x.total_cmp(&other.x))
    }
}

/// What kind of control an element is, for the spoken role suffix and the
/// synthetic event used to activate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Button,
    Toggle,
    Slider,
    Label,
    Region,
}

impl ElementKind {
    /// The spoken role name.
    #[must_use]
    pub fn spoken(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Toggle => "toggle",
            Self::Slider => "slider",
            Self::Label => "text",
            Self::Region => "region",
        }
    }
}

/// One interactive element discovered on the active surface.
#[derive(Debug, Clone)]
pub struct UiElement {
    /// Host-stable identifier, used for activation and detail lookup.
    pub id: String,
    /// Spoken label.
    pub label: String,
    pub kind: ElementKind,
    pub pos: SlotPos,
    /// Id of the visual container this element belongs to, if any.
    pub container: Option<String>,
    /// Whether the element accepts synthetic events.
    pub interactive: bool,
}

/// One visually grouped panel discovered on the active surface.
#[derive(Debug, Clone)]
pub struct UiContainer {
    pub id: String,
    /// Spoken label.
    pub label: String,
    pub pos: SlotPos,
}

/// The active visual surface, as the host integration layer exposes it.
///
/// Discovery is polled: the cursor re-reads containers and elements whenever
/// [`surface_id`](Self::surface_id) changes identity between ticks.
pub trait UiSurface {
    /// Identity of the current surface; a change triggers rediscovery.
    fn surface_id(&self) -> &str;

    /// Visually grouped panels, possibly empty.
    fn containers(&self) -> Vec<UiContainer>;

    /// Interactive elements on the surface.
    fn elements(&self) -> Vec<UiElement>;

    /// Longer description of one element, when the host has one.
    fn element_detail(&self, _id: &str) -> Option<String> {
        None
    }
}

/// A surface with nothing on it, for hosts without slot-cursor support.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSurface;

impl UiSurface for NoSurface {
    fn surface_id(&self) -> &str {
        ""
    }

    fn containers(&self) -> Vec<UiContainer> {
        Vec::new()
    }

    fn elements(&self) -> Vec<UiElement> {
        Vec::new()
    }
}
