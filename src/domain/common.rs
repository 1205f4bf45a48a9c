/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Category applied to expenses that carry no label.
pub const DEFAULT_CATEGORY: &str = "Other";
