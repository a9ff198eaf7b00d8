use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_weight: String,
    pub background: String,
    /// Color of the "N more not shown" note.
    pub note_color: String,
    pub note_font_size: f32,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_weight: "600".to_string(),
            background: "#FFFFFF".to_string(),
            note_color: "#7A8AA6".to_string(),
            note_font_size: 11.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_weight: "600".to_string(),
            background: "#14171C".to_string(),
            note_color: "#8C96A8".to_string(),
            note_font_size: 11.0,
        }
    }
}
