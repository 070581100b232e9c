use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::foundation::error::{ShowreelError, ShowreelResult};

/// Opaque handle to a section inside a [`SectionCatalog`].
///
/// Handles are only minted by the catalog and carry that catalog's token, so
/// a handle from one catalog is rejected by another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId {
    catalog: u32,
    index: u16,
}

impl SectionId {
    /// Position of the section in catalog order.
    pub fn index(self) -> usize {
        usize::from(self.index)
    }
}

impl serde::Serialize for SectionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.index)
    }
}

static NEXT_CATALOG_TOKEN: AtomicU32 = AtomicU32::new(1);

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
/// What a section shows. Closed set; there is no fallback variant for
/// unrecognised content.
pub enum SectionContent {
    /// Ordered image collection cycled by the slideshow cursor.
    Slideshow {
        /// Image keys resolved by the asset collaborator.
        items: Vec<String>,
        /// Whether the slideshow advances on its own every interval.
        #[serde(default = "default_auto_advance")]
        auto_advance: bool,
    },
    /// A group of embedded videos shown together.
    VideoGallery {
        /// Group name handed to the video collaborator.
        group: String,
        /// Video keys in the group.
        #[serde(default)]
        videos: Vec<String>,
    },
    /// Lines of text revealed one after another.
    Text {
        /// Lines in reveal order.
        lines: Vec<String>,
    },
    /// Nothing but the shared background.
    Blank,
}

fn default_auto_advance() -> bool {
    true
}

impl SectionContent {
    /// Slideshow collection length, if this is a slideshow.
    pub fn slide_count(&self) -> Option<usize> {
        match self {
            Self::Slideshow { items, .. } => Some(items.len()),
            _ => None,
        }
    }

    /// Whether the slideshow advances without user input.
    pub fn auto_advances(&self) -> bool {
        matches!(
            self,
            Self::Slideshow {
                auto_advance: true,
                ..
            }
        )
    }

    /// Video group name, if this is a video gallery.
    pub fn video_group(&self) -> Option<&str> {
        match self {
            Self::VideoGallery { group, .. } => Some(group.as_str()),
            _ => None,
        }
    }

    /// Text lines, empty for non-text sections.
    pub fn text_lines(&self) -> &[String] {
        match self {
            Self::Text { lines } => lines,
            _ => &[],
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// One named section of the portfolio.
pub struct SectionSpec {
    /// Stable identifier, e.g. `"photos"`.
    pub id: String,
    /// Button label. Defaults to the capitalised id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Section content.
    pub content: SectionContent,
}

impl SectionSpec {
    /// Build a section whose label is derived from its id.
    pub fn new(id: impl Into<String>, content: SectionContent) -> Self {
        Self {
            id: id.into(),
            label: None,
            content,
        }
    }

    /// Override the button label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label shown on the navigation affordance.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(l) => l.clone(),
            None => capitalize(&self.id),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Validated, immutable set of sections supplied at construction time.
#[derive(Clone, Debug)]
pub struct SectionCatalog {
    token: u32,
    sections: Vec<SectionSpec>,
    by_name: BTreeMap<String, SectionId>,
}

impl SectionCatalog {
    /// Validate and index a list of sections.
    ///
    /// Ids must be non-empty, unique, and free of surrounding whitespace.
    pub fn new(sections: Vec<SectionSpec>) -> ShowreelResult<Self> {
        if sections.is_empty() {
            return Err(ShowreelError::validation(
                "section catalog must contain at least one section",
            ));
        }
        if sections.len() > usize::from(u16::MAX) {
            return Err(ShowreelError::validation("too many sections"));
        }

        let token = NEXT_CATALOG_TOKEN.fetch_add(1, Ordering::Relaxed);
        let mut by_name = BTreeMap::new();
        for (idx, spec) in sections.iter().enumerate() {
            if spec.id.trim().is_empty() {
                return Err(ShowreelError::validation("section id must be non-empty"));
            }
            if spec.id.trim() != spec.id {
                return Err(ShowreelError::validation(format!(
                    "section id '{}' must not have surrounding whitespace",
                    spec.id
                )));
            }
            if let SectionContent::VideoGallery { group, .. } = &spec.content
                && group.trim().is_empty()
            {
                return Err(ShowreelError::validation(format!(
                    "section '{}' video group must be non-empty",
                    spec.id
                )));
            }
            let id = SectionId {
                catalog: token,
                index: idx as u16,
            };
            if by_name.insert(spec.id.clone(), id).is_some() {
                return Err(ShowreelError::validation(format!(
                    "duplicate section id '{}'",
                    spec.id
                )));
            }
        }

        Ok(Self {
            token,
            sections,
            by_name,
        })
    }

    /// Resolve a section name to its handle.
    pub fn resolve(&self, name: &str) -> ShowreelResult<SectionId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ShowreelError::unknown_section(format!("'{name}'")))
    }

    /// Check that a handle was minted by this catalog.
    pub fn check(&self, id: SectionId) -> ShowreelResult<SectionId> {
        match self.get(id) {
            Some(_) => Ok(id),
            None => Err(ShowreelError::unknown_section(format!(
                "index {} is not a handle of this catalog",
                id.index()
            ))),
        }
    }

    fn get(&self, id: SectionId) -> Option<&SectionSpec> {
        if id.catalog != self.token {
            return None;
        }
        self.sections.get(id.index())
    }

    /// Section spec for a handle.
    pub fn spec(&self, id: SectionId) -> ShowreelResult<&SectionSpec> {
        self.check(id)?;
        Ok(&self.sections[id.index()])
    }

    /// Section name for a handle, or `"?"` for a foreign handle.
    pub fn name(&self, id: SectionId) -> &str {
        self.get(id).map(|s| s.id.as_str()).unwrap_or("?")
    }

    /// Slideshow collection length for a section, if it has one.
    pub fn slide_count(&self, id: SectionId) -> Option<usize> {
        self.get(id).and_then(|s| s.content.slide_count())
    }

    /// Handles in catalog (button) order.
    pub fn ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        (0..self.sections.len()).map(|i| SectionId {
            catalog: self.token,
            index: i as u16,
        })
    }

    /// Sections in catalog order.
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false for a constructed catalog; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
