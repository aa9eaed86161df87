use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled main dialog block
pub fn create_dialog_block<'a>(title: &'a str, theme_color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .border_style(Style::default().fg(theme_color))
}

/// Button label as a span: `[ label ]`, filled when focused
pub fn create_button_span(label: &str, focused: bool, accent: Color) -> Span<'static> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };
    Span::styled(format!("[ {label} ]"), style)
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut = (&'static str, Color, &'static str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph<'a>(instructions: &[InstructionShortcut]) -> Paragraph<'a> {
    let mut instruction_text = Vec::new();
    for (key, color, desc) in instructions {
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(*desc, Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Common instruction shortcuts used across dialogs
pub mod shortcuts {
    use super::*;

    pub const SEPARATOR: InstructionShortcut = (" • ", Color::Gray, "");
    pub const ESC_CANCEL: InstructionShortcut = ("Esc", Color::Red, " Annuler");
    pub const ENTER_CLOSE: InstructionShortcut = ("Entrée", Color::Green, " Fermer");
    pub const TAB_SWITCH: InstructionShortcut = ("Tab", Color::Cyan, " Changer");
    pub const SCROLL: InstructionShortcut = ("j/k", Color::Yellow, " Défiler");
}
