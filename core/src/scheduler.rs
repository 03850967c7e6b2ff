use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::chip8::Chip8;
use crate::constants::frame_duration;
use crate::errors::Result;
use crate::state::FrameBuffer;

/// Something the user did since the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(u8),
    KeyUp(u8),
    Quit,
}

/// Produces keypad events; polled once at the start of every frame
pub trait Input {
    fn poll(&mut self) -> Result<Vec<InputEvent>>;
}

/// Consumes the frame buffer; only called when it changed during the frame
pub trait Renderer {
    fn render(&mut self, frame: &FrameBuffer) -> Result<()>;
}

/// Why `Scheduler::run` returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    FrameLimit,
}

/// # Scheduler
/// Drives a `Chip8` at a fixed frame rate.
///
/// Each frame:
/// - polls `Input` and applies its events
/// - runs a frame's batch of instructions and ticks the timers
/// - hands the frame buffer to the `Renderer` if it changed
/// - sleeps away whatever is left of the frame
pub struct Scheduler {
    frame_time: Duration,
    frame_limit: Option<u64>,
}

impl Scheduler {
    pub fn new(frame_rate: u32) -> Self {
        Scheduler {
            frame_time: frame_duration(frame_rate),
            frame_limit: None,
        }
    }

    /// Stop after `frames` frames even if nobody asks to quit
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    pub fn run(
        &self,
        chip8: &mut Chip8,
        input: &mut dyn Input,
        renderer: &mut dyn Renderer,
    ) -> Result<Exit> {
        let mut frames: u64 = 0;
        info!(
            "running at {} instructions per {:?} frame",
            chip8.config().instructions_per_frame,
            self.frame_time
        );

        loop {
            if self.frame_limit.map_or(false, |limit| frames >= limit) {
                debug!("stopping after {} frames", frames);
                return Ok(Exit::FrameLimit);
            }
            let frame_start = Instant::now();

            // Handle input
            for event in input.poll()? {
                match event {
                    InputEvent::KeyDown(key) => chip8.key_press(key),
                    InputEvent::KeyUp(key) => chip8.key_release(key),
                    InputEvent::Quit => {
                        debug!("quit requested after {} frames", frames);
                        return Ok(Exit::Quit);
                    }
                }
            }

            // Update state
            chip8.run_frame()?;
            if let Some(frame) = chip8.take_frame() {
                renderer.render(frame)?;
            }
            frames += 1;

            // Handle timing
            let elapsed = frame_start.elapsed();
            if self.frame_time > elapsed {
                thread::sleep(self.frame_time - elapsed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, KeypadMode};
    use crate::errors::{Chip8Error, Fault};
    use std::collections::VecDeque;

    /// Replays a scripted list of per-frame events
    struct ScriptedInput(VecDeque<Vec<InputEvent>>);

    impl Input for ScriptedInput {
        fn poll(&mut self) -> Result<Vec<InputEvent>> {
            Ok(self.0.pop_front().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct RecordingRenderer(Vec<FrameBuffer>);

    impl Renderer for RecordingRenderer {
        fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
            self.0.push(*frame);
            Ok(())
        }
    }

    fn chip8(instructions_per_frame: usize, program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new(Config {
            instructions_per_frame,
            seed: Some(1),
            ..Config::default()
        });
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_runs_until_frame_limit() {
        // DT = V0 (10) then spin
        let mut chip8 = chip8(2, &[0x60, 0x0A, 0xF0, 0x15, 0x12, 0x04]);
        let mut input = ScriptedInput(VecDeque::new());
        let mut renderer = RecordingRenderer::default();
        let exit = Scheduler::new(1000)
            .with_frame_limit(4)
            .run(&mut chip8, &mut input, &mut renderer)
            .unwrap();
        assert_eq!(exit, Exit::FrameLimit);
        // set during the first frame, then ticked once per frame
        assert_eq!(chip8.delay_timer(), 6);
    }

    #[test]
    fn test_quits_on_request() {
        let mut chip8 = chip8(1, &[0x12, 0x00]);
        let mut input = ScriptedInput(VecDeque::from(vec![vec![], vec![InputEvent::Quit]]));
        let mut renderer = RecordingRenderer::default();
        let exit = Scheduler::new(1000)
            .run(&mut chip8, &mut input, &mut renderer)
            .unwrap();
        assert_eq!(exit, Exit::Quit);
    }

    #[test]
    fn test_applies_key_events() {
        let mut chip8 = chip8(1, &[0x12, 0x00]);
        let mut input = ScriptedInput(VecDeque::from(vec![
            vec![InputEvent::KeyDown(0x1), InputEvent::KeyDown(0x2)],
            vec![InputEvent::KeyUp(0x1)],
        ]));
        let mut renderer = RecordingRenderer::default();
        Scheduler::new(1000)
            .with_frame_limit(2)
            .run(&mut chip8, &mut input, &mut renderer)
            .unwrap();
        assert!(!chip8.state().keypad[0x1]);
        assert!(chip8.state().keypad[0x2]);
    }

    #[test]
    fn test_latched_tap_lasts_the_whole_frame() {
        // V3 = K; spin
        let mut chip8 = Chip8::new(Config {
            instructions_per_frame: 2,
            keypad_mode: KeypadMode::Latched,
            seed: Some(1),
            ..Config::default()
        });
        chip8.load_program(&[0xF3, 0x0A, 0x12, 0x02]).unwrap();
        let mut input = ScriptedInput(VecDeque::from(vec![vec![
            InputEvent::KeyDown(0x5),
            InputEvent::KeyUp(0x5),
        ]]));
        let mut renderer = RecordingRenderer::default();
        Scheduler::new(1000)
            .with_frame_limit(1)
            .run(&mut chip8, &mut input, &mut renderer)
            .unwrap();
        assert_eq!(chip8.state().v[0x3], 0x5);
        assert_eq!(chip8.state().pc, 0x202);
        assert!(!chip8.state().keypad[0x5]);
    }

    #[test]
    fn test_renders_only_changed_frames() {
        // clear once, then spin
        let mut chip8 = chip8(2, &[0x00, 0xE0, 0x12, 0x02]);
        let mut input = ScriptedInput(VecDeque::new());
        let mut renderer = RecordingRenderer::default();
        Scheduler::new(1000)
            .with_frame_limit(3)
            .run(&mut chip8, &mut input, &mut renderer)
            .unwrap();
        assert_eq!(renderer.0.len(), 1);
    }

    #[test]
    fn test_stops_on_fatal_fault() {
        // return with nothing on the stack
        let mut chip8 = chip8(1, &[0x00, 0xEE]);
        let mut input = ScriptedInput(VecDeque::new());
        let mut renderer = RecordingRenderer::default();
        let result = Scheduler::new(1000).run(&mut chip8, &mut input, &mut renderer);
        assert!(matches!(
            result,
            Err(Chip8Error::OutOfBounds(Fault::StackUnderflow))
        ));
    }

    #[test]
    fn test_paces_frames() {
        let mut chip8 = chip8(1, &[0x12, 0x00]);
        let mut input = ScriptedInput(VecDeque::new());
        let mut renderer = RecordingRenderer::default();
        let scheduler = Scheduler::new(100).with_frame_limit(3);
        let started = Instant::now();
        scheduler
            .run(&mut chip8, &mut input, &mut renderer)
            .unwrap();
        assert!(started.elapsed() >= scheduler.frame_time() * 3);
    }
}
