use harness_core::{EngineHandle, FactoryOutput};

const BACKGROUND: u32 = 0x0010_1820;
const PLAYER: u32 = 0x00f0_c040;
const PLAYER_SIZE: usize = 24;
/// Pixels per millisecond.
const SPEED: f64 = 0.3;

/// Stand-in engine: a square steered by the arrow keys, drawn into an
/// in-memory framebuffer.
pub struct DemoEngine {
    width: usize,
    height: usize,
    x: f64,
    y: f64,
    framebuffer: Vec<u32>,
}

pub fn create_engine(width: u32, height: u32) -> FactoryOutput<DemoEngine> {
    let (width, height) = (width as usize, height as usize);
    if width < PLAYER_SIZE || height < PLAYER_SIZE {
        return FactoryOutput::failed(format!(
            "surface {width}x{height} is smaller than the {PLAYER_SIZE}px player"
        ));
    }

    FactoryOutput::ready(DemoEngine {
        width,
        height,
        x: (width - PLAYER_SIZE) as f64 / 2.0,
        y: (height - PLAYER_SIZE) as f64 / 2.0,
        framebuffer: vec![BACKGROUND; width * height],
    })
}

impl DemoEngine {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl EngineHandle for DemoEngine {
    fn simulate(&mut self, elapsed_ms: f64, up: bool, down: bool, left: bool, right: bool) -> Option<String> {
        if !elapsed_ms.is_finite() || elapsed_ms < 0.0 {
            return Some(format!("invalid elapsed time {elapsed_ms}"));
        }

        let step = SPEED * elapsed_ms;
        let dx = f64::from(i8::from(right) - i8::from(left));
        let dy = f64::from(i8::from(down) - i8::from(up));

        let max_x = (self.width - PLAYER_SIZE) as f64;
        let max_y = (self.height - PLAYER_SIZE) as f64;
        self.x = (self.x + dx * step).clamp(0.0, max_x);
        self.y = (self.y + dy * step).clamp(0.0, max_y);
        None
    }

    fn draw(&mut self) -> Option<String> {
        self.framebuffer.fill(BACKGROUND);

        let (x0, y0) = (self.x as usize, self.y as usize);
        for row in self.framebuffer.chunks_exact_mut(self.width).skip(y0).take(PLAYER_SIZE) {
            row[x0..x0 + PLAYER_SIZE].fill(PLAYER);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> DemoEngine {
        create_engine(1024, 768).engine.unwrap()
    }

    #[test]
    fn test_rejects_tiny_surface() {
        let out = create_engine(8, 8);
        assert!(out.error.is_some());
        assert!(out.engine.is_none());
    }

    #[test]
    fn test_moves_with_input() {
        let mut e = engine();
        let (x, y) = e.position();
        assert_eq!(e.simulate(10.0, false, false, false, true), None);
        assert_eq!(e.position(), (x + 3.0, y));
        assert_eq!(e.simulate(10.0, true, false, false, false), None);
        assert_eq!(e.position(), (x + 3.0, y - 3.0));
    }

    #[test]
    fn test_stays_on_surface() {
        let mut e = engine();
        e.simulate(100_000.0, true, false, true, false);
        assert_eq!(e.position(), (0.0, 0.0));
        assert_eq!(e.draw(), None);
        assert_eq!(e.framebuffer[0], PLAYER);
    }

    #[test]
    fn test_negative_elapsed_is_reported() {
        let mut e = engine();
        assert!(e.simulate(-1.0, false, false, false, false).is_some());
    }
}
