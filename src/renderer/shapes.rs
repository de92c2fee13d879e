//! Drawing routines for the game's actors

use glam::Vec2;
use std::f32::consts::PI;

use super::Surface;
use crate::consts::CATCH_RADIUS;
use crate::gesture::CursorState;
use crate::sim::{Adversary, Collectible};
use crate::tuning::{ADVERSARY_COLOR, ADVERSARY_GLOW, HELD_COLOR};

/// Scale below which an actor is not drawn at all
pub const MIN_VISIBLE_SCALE: f32 = 0.01;

pub const GRAB_GLOW: &str = "rgba(212, 36, 38, 0.3)";
pub const OPEN_GLOW: &str = "rgba(22, 91, 51, 0.3)";
pub const GRAB_HAND_FILL: &str = "rgba(212, 36, 38, 0.4)";
pub const OPEN_HAND_FILL: &str = "rgba(22, 91, 51, 0.4)";
/// Number of glow rings around the hand
pub const GLOW_RINGS: u32 = 3;

const RIBBON_COLOR: &str = "#FFFFFF";
const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.3)";
const EYE_COLOR: &str = "#FF0000";
const MOUTH_COLOR: &str = "#000000";
const COMBO_COLOR: &str = "#FFD700";
const COMBO_FONT: &str = "bold 24px \"Mountains of Christmas\"";

/// Wrapped box with a ribbon cross and a bow knot
pub fn collectible<S: Surface + ?Sized>(surface: &mut S, gift: &Collectible, shadows: bool) {
    let actor = &gift.actor;
    if actor.scale < MIN_VISIBLE_SCALE {
        return;
    }
    let half = actor.size / 2.0;

    surface.save();
    surface.translate(actor.center());
    surface.rotate(actor.rotation);
    surface.scale(actor.scale);

    if shadows {
        surface.set_shadow(SHADOW_COLOR, 10.0, 5.0);
    }
    surface.set_fill(if gift.caught() { HELD_COLOR } else { gift.color });
    surface.fill_rect(-half, actor.size);
    if shadows {
        surface.set_shadow(SHADOW_COLOR, 0.0, 0.0);
    }

    surface.set_stroke(RIBBON_COLOR, 3.0);
    surface.stroke_line(Vec2::new(-half.x, 0.0), Vec2::new(half.x, 0.0));
    surface.stroke_line(Vec2::new(0.0, -half.y), Vec2::new(0.0, half.y));

    surface.set_fill(RIBBON_COLOR);
    surface.fill_circle(Vec2::ZERO, 5.0);

    surface.restore();
}

/// Width of the halo drawn around a thief
pub const ADVERSARY_GLOW_WIDTH: f32 = 10.0;

/// Round green body in a faint halo, red eyes and a frown
pub fn adversary<S: Surface + ?Sized>(surface: &mut S, thief: &Adversary) {
    let actor = &thief.actor;
    if actor.scale < MIN_VISIBLE_SCALE {
        return;
    }

    surface.save();
    surface.translate(actor.center());
    surface.scale(actor.scale);

    let radius = actor.size.x / 2.0;
    surface.set_fill(ADVERSARY_GLOW);
    surface.fill_circle(Vec2::ZERO, radius + ADVERSARY_GLOW_WIDTH);
    surface.set_fill(ADVERSARY_COLOR);
    surface.fill_circle(Vec2::ZERO, radius);

    surface.set_fill(EYE_COLOR);
    surface.fill_circle(Vec2::new(-10.0, -5.0), 5.0);
    surface.fill_circle(Vec2::new(10.0, -5.0), 5.0);

    surface.set_stroke(MOUTH_COLOR, 3.0);
    surface.stroke_arc(Vec2::new(0.0, 5.0), 15.0, 0.0, PI);

    surface.restore();
}

/// Hand marker: fading glow rings plus the catch area, red while grabbing
pub fn cursor<S: Surface + ?Sized>(surface: &mut S, cursor: CursorState) {
    let (glow, fill) = if cursor.grabbing {
        (GRAB_GLOW, GRAB_HAND_FILL)
    } else {
        (OPEN_GLOW, OPEN_HAND_FILL)
    };

    surface.set_fill(glow);
    for ring in (1..=GLOW_RINGS).rev() {
        surface.fill_circle(cursor.pos, CATCH_RADIUS + ring as f32 * 5.0);
    }

    surface.set_fill(fill);
    surface.fill_circle(cursor.pos, CATCH_RADIUS);
}

/// `"{n}x"` floating above the hand
pub fn combo_label<S: Surface + ?Sized>(surface: &mut S, hand: Vec2, streak: u32) {
    surface.set_fill(COMBO_COLOR);
    surface.fill_text(
        &format!("{}x", streak),
        hand - Vec2::new(0.0, CATCH_RADIUS + 20.0),
        COMBO_FONT,
    );
}
