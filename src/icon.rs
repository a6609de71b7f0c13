use serde::{Deserialize, Serialize};

/// Decorative glyphs. Icons carry no behaviour, they only pick a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Kanban,
    Backpack,
    ListTodo,
    Activity,
    Check,
    #[default]
    CircuitBoard,
    LayoutTemplate,
    Column,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Kanban => "▥",
            Self::Backpack => "◫",
            Self::ListTodo => "☐",
            Self::Activity => "∿",
            Self::Check => "✓",
            Self::CircuitBoard => "▣",
            Self::LayoutTemplate => "▤",
            Self::Column => "▯",
        }
    }

    /// Icon shown next to a column header.
    pub fn for_column(key: &str) -> Self {
        match key {
            "backlog" => Self::Backpack,
            "todo" => Self::ListTodo,
            "inProgress" => Self::Activity,
            "done" => Self::Check,
            _ => Self::Column,
        }
    }
}
