//! Status icons for CLI output

pub struct StatusIcon;

impl StatusIcon {
    pub const PRESENT: &'static str = "✓";

    pub const MISSING: &'static str = "✗";

    pub fn get_presence_icon(exists: bool) -> &'static str {
        if exists {
            Self::PRESENT
        } else {
            Self::MISSING
        }
    }

    pub fn get_presence_text(exists: bool) -> &'static str {
        if exists {
            "Present"
        } else {
            "Missing"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_icon_and_text() {
        assert_eq!(StatusIcon::get_presence_icon(true), StatusIcon::PRESENT);
        assert_eq!(StatusIcon::get_presence_icon(false), StatusIcon::MISSING);
        assert_eq!(StatusIcon::get_presence_text(true), "Present");
        assert_eq!(StatusIcon::get_presence_text(false), "Missing");
    }
}
