use serde::Serialize;
use std::collections::BTreeSet;

/// Auxiliary views the presentation layer can show over the chat window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Panel {
    Profile,
    NewChat,
    Settings,
    Customization,
    Status,
    Favorites,
    Archived,
}

/// Which panels are currently open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Panels {
    open: BTreeSet<Panel>,
}

impl Panels {
    pub fn open(&mut self, panel: Panel) {
        self.open.insert(panel);
    }

    pub fn close(&mut self, panel: Panel) {
        self.open.remove(&panel);
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        self.open.contains(&panel)
    }

    pub fn open_panels(&self) -> impl Iterator<Item = Panel> + '_ {
        self.open.iter().copied()
    }
}
