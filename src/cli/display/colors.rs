//! Color theme for terminal output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub present: TableColor,
    pub missing: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            present: TableColor::Green,
            missing: TableColor::Yellow,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    pub fn get_presence_color(&self, exists: bool) -> TableColor {
        if exists {
            self.present
        } else {
            self.missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_presence_color(true), TableColor::Green);
        assert_eq!(theme.get_presence_color(false), TableColor::Yellow);
    }
}
