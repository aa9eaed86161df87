//! Size and button variants.
//!
//! Each variant is a closed enum resolved to a fixed preset record through
//! an exhaustive match, so adding a variant is a compile error until every
//! preset is defined.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Overall size of a selector (trigger and popup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeVariant {
    Sm,
    #[default]
    Md,
    Lg,
    Full,
}

/// Width policy of a dropdown popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupWidth {
    /// Fixed number of columns, capped to the screen.
    Columns(u16),
    /// Same width as the trigger.
    MatchTrigger,
}

/// Dimension and typography preset for a [`SizeVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    pub popup_width: PopupWidth,
    /// Horizontal padding of each list row, in columns.
    pub item_padding: u16,
    /// Rows shown before the list starts scrolling.
    pub max_visible: u16,
    pub text_modifier: Modifier,
}

impl SizeVariant {
    pub fn preset(self) -> SizePreset {
        match self {
            SizeVariant::Sm => SizePreset {
                popup_width: PopupWidth::Columns(30),
                item_padding: 0,
                max_visible: 5,
                text_modifier: Modifier::empty(),
            },
            SizeVariant::Md => SizePreset {
                popup_width: PopupWidth::Columns(36),
                item_padding: 1,
                max_visible: 8,
                text_modifier: Modifier::empty(),
            },
            SizeVariant::Lg => SizePreset {
                popup_width: PopupWidth::Columns(40),
                item_padding: 2,
                max_visible: 10,
                text_modifier: Modifier::BOLD,
            },
            SizeVariant::Full => SizePreset {
                popup_width: PopupWidth::MatchTrigger,
                item_padding: 2,
                max_visible: 10,
                text_modifier: Modifier::BOLD,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeVariant::Sm => "sm",
            SizeVariant::Md => "md",
            SizeVariant::Lg => "lg",
            SizeVariant::Full => "full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    Default,
    #[default]
    Outline,
    Secondary,
    Ghost,
}

/// Visual record for a [`ButtonVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub bordered: bool,
    pub style: Style,
    pub border_style: Style,
}

impl ButtonVariant {
    pub fn style(self) -> ButtonStyle {
        match self {
            ButtonVariant::Default => ButtonStyle {
                bordered: true,
                style: Style::default().fg(Color::Black).bg(Color::Cyan),
                border_style: Style::default().fg(Color::Cyan),
            },
            ButtonVariant::Outline => ButtonStyle {
                bordered: true,
                style: Style::default().fg(Color::White),
                border_style: Style::default().fg(Color::Gray),
            },
            ButtonVariant::Secondary => ButtonStyle {
                bordered: true,
                style: Style::default().fg(Color::White).bg(Color::DarkGray),
                border_style: Style::default().fg(Color::DarkGray),
            },
            ButtonVariant::Ghost => ButtonStyle {
                bordered: false,
                style: Style::default().fg(Color::Gray),
                border_style: Style::default(),
            },
        }
    }

    /// Rows taken by a single-line trigger of this variant.
    pub fn height(self) -> u16 {
        if self.style().bordered {
            3
        } else {
            1
        }
    }
}
