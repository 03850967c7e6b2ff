use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use log::debug;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::Color;
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{Chip8Error, FrameBuffer, Renderer};

use crate::frontend_error;

/// Terminal cells are about twice as tall as they are wide, so each pixel takes two columns
const CELLS_PER_PIXEL: usize = 2;
const CANVAS_WIDTH: usize = DISPLAY_WIDTH * CELLS_PER_PIXEL;

/// # Terminal Display
/// Draws the Chip-8 screen as block characters inside a bordered box.
///
/// Owns the terminal while it lives: raw mode and the alternate screen are entered on
/// creation and restored when it is dropped.
pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalDisplay {
    pub fn new() -> Result<Self, Chip8Error> {
        terminal::enable_raw_mode().map_err(frontend_error)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(frontend_error)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(frontend_error)?;
        terminal.hide_cursor().map_err(frontend_error)?;
        terminal.clear().map_err(frontend_error)?;
        debug!("terminal display ready");

        let mut display = TerminalDisplay { terminal };
        display.render(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT])?;
        Ok(display)
    }
}

/// Canvas coordinates of every lit pixel.
///
/// The canvas is `CANVAS_WIDTH` by `DISPLAY_HEIGHT` cells with y growing upwards,
/// so rows are negated to keep row 0 at the top.
fn lit_points(frame: &FrameBuffer) -> Vec<(f64, f64)> {
    frame
        .iter()
        .enumerate()
        .flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &pixel)| pixel != 0)
                .flat_map(move |(x, _)| {
                    let left = x * CELLS_PER_PIXEL;
                    (left..left + CELLS_PER_PIXEL).map(move |column| (column as f64, -(y as f64)))
                })
        })
        .collect()
}

impl Renderer for TerminalDisplay {
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), Chip8Error> {
        let points = lit_points(frame);
        self.terminal
            .draw(|f| {
                // the border takes one cell on each side
                let area = Rect::new(0, 0, CANVAS_WIDTH as u16 + 2, DISPLAY_HEIGHT as u16 + 2)
                    .intersection(f.size());
                let canvas = Canvas::default()
                    .block(Block::default().title("CHIP-8").borders(Borders::ALL))
                    .x_bounds([0.0, (CANVAS_WIDTH - 1) as f64])
                    .y_bounds([-((DISPLAY_HEIGHT - 1) as f64), 0.0])
                    .marker(Marker::Block)
                    .paint(|ctx| {
                        ctx.draw(&Points {
                            coords: &points,
                            color: Color::White,
                        })
                    });
                f.render_widget(canvas, area);
            })
            .map_err(frontend_error)?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        // nothing sensible to do if the terminal can't be restored
        let _ = self.terminal.show_cursor();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_frame_has_no_points() {
        assert!(lit_points(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT]).is_empty());
    }

    #[test]
    fn test_pixels_are_two_cells_wide() {
        let mut frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[2][3] = 1;
        assert_eq!(lit_points(&frame), vec![(6.0, -2.0), (7.0, -2.0)]);
    }

    #[test]
    fn test_corners_stay_inside_canvas_bounds() {
        let mut frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0] = 1;
        frame[DISPLAY_HEIGHT - 1][DISPLAY_WIDTH - 1] = 1;
        let points = lit_points(&frame);
        assert_eq!(points.first(), Some(&(0.0, 0.0)));
        assert_eq!(
            points.last(),
            Some(&((CANVAS_WIDTH - 1) as f64, -((DISPLAY_HEIGHT - 1) as f64)))
        );
    }
}
