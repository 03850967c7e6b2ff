use sdl2::pixels::PixelFormatEnum;

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::{Chip8Error, FrameBuffer, Renderer};

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 32x64 bytes.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    width: usize,
    height: usize,
}

fn frontend_error(e: impl ToString) -> Chip8Error {
    Chip8Error::Frontend(e.to_string())
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: usize) -> Result<Self, Chip8Error> {
        let video_subsystem = sdl.video().map_err(frontend_error)?;
        let window = video_subsystem
            .window(
                "CHIP-8",
                (DISPLAY_WIDTH * scale) as u32,
                (DISPLAY_HEIGHT * scale) as u32,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(frontend_error)?;
        let canvas = window.into_canvas().build().map_err(frontend_error)?;

        let mut display = Display {
            canvas,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        };
        display.render(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT])?;
        Ok(display)
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(pixel).take(3))
            .map(|pixel| pixel * 255)
            .collect()
    }
}

impl Renderer for Display {
    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), Chip8Error> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                self.width as u32,
                self.height as u32,
            )
            .map_err(frontend_error)?;

        let pixels = Display::frame_to_sdl_texture(frame);
        let row_bytes = self.width * 3;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded out to `pitch` bytes
                for (row, line) in pixels.chunks(row_bytes).enumerate() {
                    buffer[row * pitch..row * pitch + row_bytes].copy_from_slice(line);
                }
            })
            .map_err(frontend_error)?;

        self.canvas.copy(&texture, None, None).map_err(frontend_error)?;
        self.canvas.present();
        Ok(())
    }
}
