use std::io;

use ratatui::{backend::Backend, Terminal};

use super::{Glyph, Scene};
use crate::arena::{Arena, Position};

/// Drawing operations the game issues. Nothing reaches the screen until
/// `present` is called.
pub trait RenderSurface {
    /// Current screen size as (height, width).
    fn size(&self) -> io::Result<(u16, u16)>;

    fn clear_arena(&mut self, arena: Arena);

    fn draw_border(&mut self);

    fn draw_glyph(&mut self, pos: Position, glyph: Glyph);

    fn erase_cell(&mut self, pos: Position);

    fn draw_status_bar(&mut self, score: u32, remaining_secs: u64);

    fn draw_instructions(&mut self, text: &str);

    fn show_end_prompt(&mut self, score: u32, high_score: u32);

    fn present(&mut self) -> io::Result<()>;
}

/// Render surface backed by a ratatui terminal
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    scene: Scene,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            scene: Scene::default(),
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> RenderSurface for TerminalSurface<B> {
    fn size(&self) -> io::Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.height, size.width))
    }

    fn clear_arena(&mut self, arena: Arena) {
        self.scene.clear_arena(arena);
    }

    fn draw_border(&mut self) {
        self.scene.draw_border();
    }

    fn draw_glyph(&mut self, pos: Position, glyph: Glyph) {
        self.scene.draw_glyph(pos, glyph);
    }

    fn erase_cell(&mut self, pos: Position) {
        self.scene.erase_cell(pos);
    }

    fn draw_status_bar(&mut self, score: u32, remaining_secs: u64) {
        self.scene.set_status(score, remaining_secs);
    }

    fn draw_instructions(&mut self, text: &str) {
        self.scene.set_instructions(text);
    }

    fn show_end_prompt(&mut self, score: u32, high_score: u32) {
        self.scene.show_prompt(score, high_score);
    }

    fn present(&mut self) -> io::Result<()> {
        let scene = &self.scene;
        self.terminal.draw(|f| f.render_widget(scene, f.area()))?;
        Ok(())
    }
}
