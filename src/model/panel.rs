//! Panel identities
//!
//! A panel is addressed by a stable string key and carries an enumerated
//! kind tag. The kind decides which external content renderer gets mounted;
//! the layout engine never looks at panel content.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of panel types the workspace knows how to host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelKind {
    ShopParameters,
    Inventory,
    ShopList,
    Details,
    Assistant,
}

impl PanelKind {
    /// All kinds, in default layout order
    pub const ALL: [PanelKind; 5] = [
        PanelKind::ShopParameters,
        PanelKind::Inventory,
        PanelKind::ShopList,
        PanelKind::Details,
        PanelKind::Assistant,
    ];

    /// Wire tag used in persisted layouts and drag payloads
    pub fn tag(&self) -> &'static str {
        match self {
            PanelKind::ShopParameters => "shopParameters",
            PanelKind::Inventory => "inventory",
            PanelKind::ShopList => "shopList",
            PanelKind::Details => "details",
            PanelKind::Assistant => "assistant",
        }
    }

    /// Parse a wire tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<PanelKind> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Title shown in the tab strip
    pub fn display_name(&self) -> &'static str {
        match self {
            PanelKind::ShopParameters => "Shop Parameters",
            PanelKind::Inventory => "Inventory",
            PanelKind::ShopList => "Shops",
            PanelKind::Details => "Details",
            PanelKind::Assistant => "Assistant",
        }
    }

    /// Narrowest usable width of this panel's content, in logical pixels
    pub fn default_min_width(&self) -> f32 {
        match self {
            PanelKind::ShopParameters => 280.0,
            PanelKind::Inventory => 360.0,
            PanelKind::ShopList => 220.0,
            PanelKind::Details => 260.0,
            PanelKind::Assistant => 300.0,
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Stable identity of a panel
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelKey(pub String);

impl PanelKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// A single addressable content unit
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub key: PanelKey,
    pub kind: PanelKind,
    /// Minimum width in logical pixels
    pub min_width: f32,
}

impl Panel {
    /// Create a panel with its kind's default minimum width
    pub fn new(key: impl Into<PanelKey>, kind: PanelKind) -> Self {
        Self {
            key: key.into(),
            kind,
            min_width: kind.default_min_width(),
        }
    }

    /// The panel the default layout uses for a kind (key = wire tag)
    pub fn default_for(kind: PanelKind) -> Self {
        Self::new(kind.tag(), kind)
    }

    pub fn title(&self) -> &'static str {
        self.kind.display_name()
    }
}

impl From<String> for PanelKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}
