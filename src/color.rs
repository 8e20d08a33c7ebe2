use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: chart category → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct categories of the active chart to distinct bar colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<CellValue, Color32>,
    fallback: Color32,
}

impl CategoryColors {
    /// Build a colour per category, in the order the categories are given.
    pub fn new<'a>(categories: impl ExactSizeIterator<Item = &'a CellValue>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<CellValue, Color32> = categories
            .zip(palette.into_iter())
            .map(|(v, c): (&CellValue, Color32)| (v.clone(), c))
            .collect();

        CategoryColors {
            mapping,
            fallback: Color32::GRAY,
        }
    }

    /// Look up the colour for a category.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(self.fallback)
    }
}
