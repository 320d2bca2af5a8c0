use std::fmt;

use serde::Deserialize;

use super::{Identified, Identifier};
use crate::TwitchError;

closed_set! {
    /// Slot kind an extension can occupy.
    ExtensionType {
        Component => "component",
        Mobile => "mobile",
        Panel => "panel",
        Overlay => "overlay",
    }
}

/// Extension object from GET /helix/users/extensions/list.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtensionPayload {
    pub id: String,
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub can_activate: bool,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub x: Option<i64>,
    #[serde(default)]
    pub y: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct Extension {
    id: Identifier,
    version: String,
    name: String,
    activatable: bool,
    types: Vec<ExtensionType>,
    position: Option<(i64, i64)>,
}

impl TryFrom<ExtensionPayload> for Extension {
    type Error = TwitchError;

    fn try_from(data: ExtensionPayload) -> Result<Self, Self::Error> {
        let types = data
            .types
            .iter()
            .map(|t| ExtensionType::parse(t))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            id: data.id.into(),
            version: data.version,
            name: data.name,
            activatable: data.can_activate,
            types,
            position: data.x.zip(data.y),
        })
    }
}

impl Extension {
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activatable(&self) -> bool {
        self.activatable
    }

    pub fn types(&self) -> &[ExtensionType] {
        &self.types
    }

    pub fn is_component(&self) -> bool {
        self.types.contains(&ExtensionType::Component)
    }

    pub fn is_mobile(&self) -> bool {
        self.types.contains(&ExtensionType::Mobile)
    }

    pub fn is_panel(&self) -> bool {
        self.types.contains(&ExtensionType::Panel)
    }

    pub fn is_overlay(&self) -> bool {
        self.types.contains(&ExtensionType::Overlay)
    }

    /// Component placement, when the payload includes coordinates.
    pub fn position(&self) -> Option<(i64, i64)> {
        self.position
    }
}

impl Identified for Extension {
    fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self
            .types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Extension {}: {} v{} has types [{types}]",
            self.id, self.name, self.version
        )
    }
}

id_equality!(Extension);
