pub mod game_over;
pub mod surface;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Paragraph, Widget},
};

use crate::arena::{Arena, Position};
use game_over::GameOverPrompt;

pub use surface::{RenderSurface, TerminalSurface};

/// Cells between the terminal edge and the arena border.
pub const ARENA_INSET: u16 = 2;

pub const INSTRUCTIONS: &str = "Use h,j,k,l to move | q to quit";

/// What occupies a cell inside the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Cursor,
    Target,
}

impl Glyph {
    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Cursor => "█",
            Glyph::Target => "•",
        }
    }

    pub fn style(self) -> Style {
        match self {
            Glyph::Cursor => Style::default().fg(Color::White),
            Glyph::Target => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub score: u32,
    pub remaining_secs: u64,
}

/// Retained picture of the screen; the surface operations edit it and every
/// frame renders it whole.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    arena: Option<Arena>,
    border: bool,
    cursor: Option<Position>,
    target: Option<Position>,
    status: Option<Status>,
    instructions: Option<String>,
    prompt: Option<GameOverPrompt>,
}

impl Scene {
    pub fn arena(&self) -> Option<Arena> {
        self.arena
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    pub fn target(&self) -> Option<Position> {
        self.target
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    pub fn prompt(&self) -> Option<&GameOverPrompt> {
        self.prompt.as_ref()
    }

    /// Starts a blank arena; glyphs, border and any prompt are dropped.
    pub fn clear_arena(&mut self, arena: Arena) {
        self.arena = Some(arena);
        self.border = false;
        self.cursor = None;
        self.target = None;
        self.prompt = None;
    }

    pub fn draw_border(&mut self) {
        self.border = true;
    }

    pub fn draw_glyph(&mut self, pos: Position, glyph: Glyph) {
        match glyph {
            Glyph::Cursor => self.cursor = Some(pos),
            Glyph::Target => self.target = Some(pos),
        }
    }

    pub fn erase_cell(&mut self, pos: Position) {
        if self.cursor == Some(pos) {
            self.cursor = None;
        }
        if self.target == Some(pos) {
            self.target = None;
        }
    }

    pub fn set_status(&mut self, score: u32, remaining_secs: u64) {
        self.status = Some(Status {
            score,
            remaining_secs,
        });
    }

    pub fn set_instructions(&mut self, text: &str) {
        self.instructions = Some(text.to_owned());
    }

    pub fn show_prompt(&mut self, score: u32, high_score: u32) {
        self.prompt = Some(GameOverPrompt::new(score, high_score));
    }
}

/// Where the arena lands inside the terminal area.
pub fn arena_rect(area: Rect, arena: Arena) -> Rect {
    Rect::new(
        area.x + ARENA_INSET,
        area.y + ARENA_INSET,
        arena.width(),
        arena.height(),
    )
    .intersection(area)
}

impl Widget for &Scene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        if area.height == 0 {
            return;
        }

        if let Some(status) = self.status {
            let line = Rect::new(
                area.x + ARENA_INSET,
                area.y,
                area.width.saturating_sub(ARENA_INSET),
                1,
            );
            Paragraph::new(Span::styled(
                format!(
                    "Score: {} | Time: {}s",
                    status.score, status.remaining_secs
                ),
                bold_style,
            ))
            .render(line, buf);
        }

        if let Some(text) = &self.instructions {
            let line = Rect::new(
                area.x + ARENA_INSET,
                area.bottom() - 1,
                area.width.saturating_sub(ARENA_INSET),
                1,
            );
            Paragraph::new(text.as_str()).render(line, buf);
        }

        let Some(arena) = self.arena else {
            return;
        };
        let arena_area = arena_rect(area, arena);

        if self.border {
            Block::bordered()
                .border_style(Style::default().fg(Color::White))
                .render(arena_area, buf);
        }

        // cursor last so it sits on top
        let glyphs = [
            (self.target, Glyph::Target),
            (self.cursor, Glyph::Cursor),
        ];
        for (pos, glyph) in glyphs {
            let Some(pos) = pos else { continue };
            let (x, y) = (arena_area.x + pos.col, arena_area.y + pos.row);
            if x < arena_area.right() && y < arena_area.bottom() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(glyph.symbol()).set_style(glyph.style());
                }
            }
        }

        if let Some(prompt) = &self.prompt {
            prompt.render(arena_area, buf);
        }
    }
}
