use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

pub const REPLAY_HINT: &str = "Press 'p' to play again or 'q' to quit";

/// End-of-round box showing the score and the session best
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverPrompt {
    pub score: u32,
    pub high_score: u32,
}

impl GameOverPrompt {
    pub fn new(score: u32, high_score: u32) -> Self {
        Self { score, high_score }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            "Game Over!".to_string(),
            String::new(),
            format!("Score: {}", self.score),
            format!("High Score: {}", self.high_score),
            String::new(),
            REPLAY_HINT.to_string(),
        ]
    }
}

impl Widget for &GameOverPrompt {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let lines = self.lines();

        let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = (content_width + 4).min(area.width);
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        Clear.render(popup, buf);
        Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
            .style(bold_style)
            .alignment(Alignment::Center)
            .block(Block::bordered())
            .render(popup, buf);
    }
}
