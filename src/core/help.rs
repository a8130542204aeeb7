//! On-demand help panel.
//!
//! The panel's content is not part of the initial state. Showing the panel
//! moves it into [`HelpPanel::Loading`] and asks the caller to build the
//! content; hiding it drops whatever was built. Load completions carry the
//! generation they were requested under so a completion that arrives after
//! the panel was hidden again is ignored.

use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelpContent {
    pub heading: String,
    pub paragraphs: Vec<String>,
}

impl HelpContent {
    /// Build the panel content from the text bundled into the binary.
    pub fn load() -> Self {
        const HELP_CONTENT: &str = include_str!("../builtins/help.toml");
        Self::parse(HELP_CONTENT)
    }

    fn parse(source: &str) -> Self {
        match toml::from_str::<HelpContent>(source) {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, "bundled help text failed to parse");
                HelpContent {
                    heading: "Help".to_string(),
                    paragraphs: vec![format!("Help text is unavailable: {err}")],
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HelpPanel {
    #[default]
    Hidden,
    Loading {
        generation: u64,
    },
    Visible(HelpContent),
}

#[derive(Debug, Default)]
pub struct HelpLoader {
    panel: HelpPanel,
    generation: u64,
}

impl HelpLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip visibility. Returns the generation to load when the panel just
    /// became visible.
    pub fn toggle(&mut self) -> Option<u64> {
        match self.panel {
            HelpPanel::Hidden => {
                self.generation = self.generation.wrapping_add(1);
                self.panel = HelpPanel::Loading {
                    generation: self.generation,
                };
                Some(self.generation)
            }
            HelpPanel::Loading { .. } | HelpPanel::Visible(_) => {
                self.panel = HelpPanel::Hidden;
                None
            }
        }
    }

    /// Install loaded content. Returns false when the load is stale.
    pub fn finish_load(&mut self, generation: u64, content: HelpContent) -> bool {
        match self.panel {
            HelpPanel::Loading { generation: pending } if pending == generation => {
                self.panel = HelpPanel::Visible(content);
                true
            }
            _ => false,
        }
    }

    pub fn panel(&self) -> &HelpPanel {
        &self.panel
    }

    /// True while loading or visible.
    pub fn is_shown(&self) -> bool {
        !matches!(self.panel, HelpPanel::Hidden)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.panel, HelpPanel::Loading { .. })
    }

    pub fn content(&self) -> Option<&HelpContent> {
        match &self.panel {
            HelpPanel::Visible(content) => Some(content),
            _ => None,
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_shown() {
            "Hide Help"
        } else {
            "Show Help"
        }
    }
}
