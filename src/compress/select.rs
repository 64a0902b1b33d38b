use crate::document::model::{Document, TextureId};
use crate::foundation::error::{SquooshError, SquooshResult};

/// Filter value that matches every format or slot.
pub const WILDCARD: &str = "*";

const SLOT_MATCH: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Which textures a compression run processes.
///
/// `formats` is [`WILDCARD`] or an image subtype (`jpeg`, `png`, ...) compared against
/// `image/{formats}`. `slots` is [`WILDCARD`] or a case-insensitive glob matched against the
/// texture's slot names; besides `*`, `?` and `[...]` it accepts brace alternation
/// (`{normal,occlusion}Texture`).
#[derive(Clone, Debug)]
pub struct SelectionCriteria {
    formats: String,
    slots: String,
    slot_patterns: Option<Vec<glob::Pattern>>,
    exclude_mime_type: Option<String>,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self::all()
    }
}

impl SelectionCriteria {
    /// Build criteria from a format filter and a slot glob.
    ///
    /// Fails when `slots` is not a valid glob pattern.
    pub fn new(formats: impl Into<String>, slots: impl Into<String>) -> SquooshResult<Self> {
        let slots = slots.into();
        let slot_patterns = if slots == WILDCARD {
            None
        } else {
            let patterns = expand_braces(&slots)
                .iter()
                .map(|alt| glob::Pattern::new(alt))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    SquooshError::validation(format!("invalid slots pattern \"{slots}\": {e}"))
                })?;
            Some(patterns)
        };
        Ok(Self {
            formats: formats.into(),
            slots,
            slot_patterns,
            exclude_mime_type: None,
        })
    }

    /// Criteria that select every texture.
    pub fn all() -> Self {
        Self {
            formats: WILDCARD.to_string(),
            slots: WILDCARD.to_string(),
            slot_patterns: None,
            exclude_mime_type: None,
        }
    }

    /// Always skip textures whose MIME type equals `mime_type`, before any other filter.
    pub fn excluding_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.exclude_mime_type = Some(mime_type.into());
        self
    }

    /// Format filter as given.
    pub fn formats(&self) -> &str {
        &self.formats
    }

    /// Slot filter as given.
    pub fn slots(&self) -> &str {
        &self.slots
    }

    /// MIME type that is always skipped, if any.
    pub fn exclude_mime_type(&self) -> Option<&str> {
        self.exclude_mime_type.as_deref()
    }

    /// `true` when `mime_type` passes the format filter.
    pub fn matches_format(&self, mime_type: &str) -> bool {
        self.formats == WILDCARD
            || mime_type
                .strip_prefix("image/")
                .is_some_and(|subtype| subtype == self.formats)
    }

    /// `true` when at least one slot passes the slot filter. Empty `slots` only pass the wildcard.
    pub fn matches_slots(&self, slots: &[String]) -> bool {
        match &self.slot_patterns {
            None => true,
            Some(patterns) => slots.iter().any(|slot| {
                patterns
                    .iter()
                    .any(|pattern| pattern.matches_with(slot, SLOT_MATCH))
            }),
        }
    }
}

/// Expand shell-style brace alternation into plain glob patterns.
///
/// `{a,b}x` becomes `ax`, `bx`; groups may nest. A group without a top-level comma or without a
/// closing brace stays literal.
fn expand_braces(pattern: &str) -> Vec<String> {
    let bytes = pattern.as_bytes();
    let mut search_from = 0usize;

    while let Some(rel) = pattern[search_from..].find('{') {
        let open = search_from + rel;
        let mut depth = 0usize;
        let mut bounds = vec![open];
        let mut close = None;
        for (i, b) in bytes.iter().enumerate().skip(open) {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                b',' if depth == 1 => bounds.push(i),
                _ => {}
            }
        }

        let Some(close) = close else {
            break;
        };
        if bounds.len() == 1 {
            search_from = open + 1;
            continue;
        }
        bounds.push(close);

        let prefix = &pattern[..open];
        let suffix = &pattern[close + 1..];
        return bounds
            .windows(2)
            .flat_map(|w| {
                let alt = &pattern[w[0] + 1..w[1]];
                expand_braces(&format!("{prefix}{alt}{suffix}"))
            })
            .collect();
    }

    vec![pattern.to_string()]
}

/// A texture chosen for recompression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedTexture {
    /// Texture position in the document.
    pub id: TextureId,
    /// Resolved slot names (see [`Document::texture_slots`]).
    pub slots: Vec<String>,
    /// Human-readable label: URI, else name, else `index/total` (1-based).
    pub label: String,
}

/// Label used in log output for the texture at `id`.
pub fn texture_label(doc: &Document, id: TextureId) -> String {
    let total = doc.textures().len();
    doc.texture(id)
        .and_then(|t| t.uri().or(t.name()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}/{}", id.0 + 1, total))
}

/// Return the textures of `doc` that pass `criteria`, in document order.
pub fn select_textures(doc: &Document, criteria: &SelectionCriteria) -> Vec<SelectedTexture> {
    let logger = doc.logger();
    let mut selected = Vec::new();

    for (index, texture) in doc.textures().iter().enumerate() {
        let id = TextureId(index);
        let slots = doc.texture_slots(id);
        let label = texture_label(doc, id);

        if criteria
            .exclude_mime_type()
            .is_some_and(|m| m == texture.mime_type())
        {
            logger.debug(&format!(
                "• Skipping {label}, already {}.",
                texture.mime_type()
            ));
            continue;
        }
        if !criteria.matches_format(texture.mime_type()) {
            logger.debug(&format!(
                "• Skipping {label}, excluded by formats \"{}\".",
                criteria.formats()
            ));
            continue;
        }
        if !criteria.matches_slots(&slots) {
            logger.debug(&format!(
                "• Skipping {label}, excluded by slots \"{}\".",
                criteria.slots()
            ));
            continue;
        }

        selected.push(SelectedTexture { id, slots, label });
    }

    selected
}

#[cfg(test)]
#[path = "../../tests/unit/compress/select.rs"]
mod tests;
