use indexmap::IndexMap;
use tracing::warn;

use crate::core::bar_value::{ColorAllocator, ColorId, DEFAULT_COLOR_ID};

/// Interning color allocator.
///
/// Id `0` is reserved for the series default, so the first distinct color
/// receives id `1`. At most `u16::MAX` colors are interned; later new colors
/// resolve to the default id.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    colors: IndexMap<String, ColorId>,
}

impl Palette {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[must_use]
    pub fn color_by_id(&self, id: ColorId) -> Option<&str> {
        if id == DEFAULT_COLOR_ID {
            return None;
        }
        self.colors
            .get_index(usize::from(id) - 1)
            .map(|(color, _)| color.as_str())
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }
}

impl ColorAllocator for Palette {
    fn add_color(&mut self, color: &str) -> ColorId {
        if let Some(id) = self.colors.get(color) {
            return *id;
        }
        let Ok(id) = ColorId::try_from(self.colors.len() + 1) else {
            warn!(
                color,
                interned = self.colors.len(),
                "palette exhausted; falling back to the default color"
            );
            return DEFAULT_COLOR_ID;
        };
        self.colors.insert(color.to_owned(), id);
        id
    }
}
