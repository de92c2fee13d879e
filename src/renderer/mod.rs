//! 2D rendering module
//!
//! Draws a frame from a shared view of the game state onto anything that
//! implements [`Surface`]. On wasm that is the page canvas; tests record the
//! calls instead.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::gesture::CursorState;
use crate::settings::Settings;
use crate::sim::GameState;

/// Number of background stars
pub const STAR_COUNT: usize = 100;
/// Star drift speed (px per ms)
pub const STAR_DRIFT: f32 = 0.05;
/// Vertical spacing between consecutive stars (px)
pub const STAR_SPACING: f32 = 50.0;
const STAR_COLOR: &str = "rgba(255, 255, 255, 0.3)";

/// Immediate-mode 2D drawing primitives
///
/// Mirrors the subset of the canvas 2D context the game needs. Transforms
/// stack with `save`/`restore`.
pub trait Surface {
    fn clear(&mut self, size: Vec2);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, factor: f32);
    fn set_fill(&mut self, color: &str);
    fn set_stroke(&mut self, color: &str, width: f32);
    /// Blur 0 disables the shadow
    fn set_shadow(&mut self, color: &str, blur: f32, offset_y: f32);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32);
    /// Centered text
    fn fill_text(&mut self, text: &str, at: Vec2, font: &str);
}

/// A background star: horizontal position as a fraction of the width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x_frac: f32,
    pub radius: f32,
}

/// Frame renderer. Holds only cosmetic data; game state is borrowed per
/// frame and never written.
#[derive(Debug, Clone)]
pub struct Renderer {
    stars: Vec<Star>,
}

impl Renderer {
    /// Precompute the starfield from `seed`
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x_frac: rng.random_range(0.0..1.0),
                radius: rng.random_range(1.0..4.0),
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Star center at `time_ms` on a canvas of `size`
    pub fn star_position(&self, index: usize, size: Vec2, time_ms: f64) -> Option<Vec2> {
        let star = self.stars.get(index)?;
        let height = size.y.max(1.0);
        let y = (time_ms as f32 * STAR_DRIFT + index as f32 * STAR_SPACING).rem_euclid(height);
        Some(Vec2::new(star.x_frac * size.x, y))
    }

    /// Draw one frame: background, gifts, thieves, then the hand cursor on top
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        state: &GameState,
        cursor: CursorState,
        time_ms: f64,
        settings: &Settings,
    ) {
        surface.clear(state.canvas);

        if settings.starfield {
            let star_time = if settings.effective_starfield_motion() {
                time_ms
            } else {
                0.0
            };
            surface.set_fill(STAR_COLOR);
            for (i, star) in self.stars.iter().enumerate() {
                if let Some(pos) = self.star_position(i, state.canvas, star_time) {
                    surface.fill_circle(pos, star.radius);
                }
            }
        }

        for collectible in &state.collectibles {
            shapes::collectible(surface, collectible, settings.shadows);
        }
        for adversary in &state.adversaries {
            shapes::adversary(surface, adversary);
        }

        shapes::cursor(surface, cursor);
        if state.combo.shows_multiplier() {
            shapes::combo_label(surface, cursor.pos, state.combo.streak());
        }
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{Call, RecordingSurface};
    use super::*;
    use crate::sim::spawn::{spawn_adversary_at, spawn_collectible_at};
    use crate::sim::state::EntrySide;

    fn state() -> GameState {
        GameState::new(1, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_starfield_is_seeded() {
        assert_eq!(Renderer::new(3).stars(), Renderer::new(3).stars());
        assert_ne!(Renderer::new(3).stars(), Renderer::new(4).stars());
        for star in Renderer::new(3).stars() {
            assert!((0.0..1.0).contains(&star.x_frac));
            assert!((1.0..4.0).contains(&star.radius));
        }
    }

    #[test]
    fn test_stars_drift_and_wrap() {
        let renderer = Renderer::new(1);
        let size = Vec2::new(800.0, 600.0);
        let at_zero = renderer.star_position(2, size, 0.0).unwrap();
        assert_eq!(at_zero.y, 100.0);
        let later = renderer.star_position(2, size, 1000.0).unwrap();
        assert_eq!(later.y, 150.0);
        let wrapped = renderer.star_position(2, size, 12_000.0).unwrap();
        assert_eq!(wrapped.y, 100.0);
        assert!(renderer.star_position(STAR_COUNT, size, 0.0).is_none());
    }

    #[test]
    fn test_frame_draw_order() {
        let mut state = state();
        spawn_collectible_at(&mut state, Vec2::new(100.0, 100.0), 2.0, 0.0, "#FF4444");
        state.collectibles[0].actor.scale = 1.0;
        spawn_adversary_at(&mut state, EntrySide::Left, 200.0);
        state.adversaries[0].actor.scale = 1.0;

        let mut surface = RecordingSurface::default();
        Renderer::new(1).render(
            &mut surface,
            &state,
            CursorState::new(400.0, 300.0, false),
            0.0,
            &Settings::default(),
        );

        assert_eq!(surface.calls[0], Call::Clear(Vec2::new(800.0, 600.0)));
        let gift_fill = surface
            .calls
            .iter()
            .position(|c| *c == Call::Fill("#FF4444".into()))
            .unwrap();
        let thief_fill = surface
            .calls
            .iter()
            .position(|c| *c == Call::Fill(crate::tuning::ADVERSARY_COLOR.into()))
            .unwrap();
        let cursor_fill = surface
            .calls
            .iter()
            .position(|c| *c == Call::Fill(shapes::OPEN_HAND_FILL.into()))
            .unwrap();
        assert!(gift_fill < thief_fill && thief_fill < cursor_fill);
        assert_eq!(
            surface.count(|c| *c == Call::Save),
            surface.count(|c| *c == Call::Restore)
        );
    }

    #[test]
    fn test_starfield_toggle() {
        let state = state();
        let cursor = CursorState::default();
        let mut on = RecordingSurface::default();
        Renderer::new(1).render(&mut on, &state, cursor, 0.0, &Settings::default());
        let mut off = RecordingSurface::default();
        let settings = Settings {
            starfield: false,
            ..Settings::default()
        };
        Renderer::new(1).render(&mut off, &state, cursor, 0.0, &settings);
        let circles = |s: &RecordingSurface| s.count(|c| matches!(c, Call::Circle(..)));
        assert_eq!(circles(&on) - circles(&off), STAR_COUNT);
    }

    #[test]
    fn test_combo_label_only_with_multiplier() {
        let mut state = state();
        let cursor = CursorState::new(400.0, 300.0, true);
        let settings = Settings::default();
        let renderer = Renderer::new(1);

        state.combo.record_catch(0.0);
        let mut surface = RecordingSurface::default();
        renderer.render(&mut surface, &state, cursor, 0.0, &settings);
        assert_eq!(surface.count(|c| matches!(c, Call::Text(..))), 0);

        state.combo.record_catch(100.0);
        let mut surface = RecordingSurface::default();
        renderer.render(&mut surface, &state, cursor, 0.0, &settings);
        assert!(surface.calls.contains(&Call::Text("2x".into(), Vec2::new(400.0, 220.0))));
    }

    #[test]
    fn test_render_does_not_touch_state() {
        let mut state = state();
        spawn_collectible_at(&mut state, Vec2::new(100.0, 100.0), 2.0, 0.5, "#2196F3");
        let before = format!("{:?}", state);
        let mut surface = RecordingSurface::default();
        Renderer::new(1).render(
            &mut surface,
            &state,
            CursorState::default(),
            50.0,
            &Settings::default(),
        );
        assert_eq!(format!("{:?}", state), before);
    }
}
