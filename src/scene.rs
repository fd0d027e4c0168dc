//! Painting a [`World`] onto a [`Canvas`].
//!
//! Draw order is back to front: orbit rings, bodies, labels, HUD. World space
//! (origin at the fixed centre, y up) maps onto the canvas with the fixed
//! centre in the middle of the canvas and y flipped.

use glam::DVec2;

use crate::body::{CelestialBody, Color};
use crate::canvas::{Canvas, TextStyle};
use crate::config::{DAYS_PER_SECOND, ORBIT_COLOR};
use crate::world::World;

pub const BACKGROUND: Color = Color::BLACK;
pub const ORBIT_WIDTH: f32 = 1.0;

pub const HUD_TEXT_SIZE: f32 = 14.0;
pub const LABEL_TEXT_SIZE: f32 = 7.0;
/// Gap between the bottom of a disc and the top of its label.
pub const LABEL_GAP: f64 = 10.0;

pub const HELP_LINES: [&str; 3] = [
    "SPACE: Pause/Resume",
    "UP/DOWN: Increase/Decrease speed",
    "ESC: Quit",
];

const HUD_MARGIN: f64 = 10.0;
const HUD_LINE_HEIGHT: f64 = 20.0;

/// World space to canvas space.
#[inline]
pub fn to_screen(center: DVec2, world: DVec2) -> DVec2 {
    DVec2::new(center.x + world.x, center.y - world.y)
}

/// Paint one full frame. Does not present it.
pub fn draw<C: Canvas>(world: &World, canvas: &mut C) {
    let center = canvas.size() * 0.5;
    canvas.clear(BACKGROUND);

    let bodies = world.bodies();
    for body in bodies.iter().filter(|b| b.is_orbiting()) {
        let anchor = anchor_position(bodies, body);
        canvas.stroke_circle(
            to_screen(center, anchor),
            body.orbit_radius_px() as f32,
            ORBIT_WIDTH,
            ORBIT_COLOR,
        );
    }

    for body in bodies {
        canvas.fill_circle(to_screen(center, body.position()), body.radius_px(), body.color());
    }

    let label_style = TextStyle::new(LABEL_TEXT_SIZE, Color::WHITE).centered();
    for body in bodies.iter().filter(|b| b.style().labelled()) {
        let at = to_screen(center, body.position())
            + DVec2::new(0.0, body.radius_px() as f64 + LABEL_GAP);
        canvas.draw_text(body.name(), at, label_style);
    }

    draw_hud(world, canvas);
}

fn anchor_position(bodies: &[CelestialBody], body: &CelestialBody) -> DVec2 {
    body.parent()
        .and_then(|p| bodies.get(p.index()))
        .map(|p| p.position())
        .unwrap_or_default()
}

fn draw_hud<C: Canvas>(world: &World, canvas: &mut C) {
    let style = TextStyle::new(HUD_TEXT_SIZE, Color::WHITE);

    for (i, line) in HELP_LINES.iter().enumerate() {
        let at = DVec2::new(HUD_MARGIN, HUD_MARGIN + i as f64 * HUD_LINE_HEIGHT);
        canvas.draw_text(line, at, style);
    }

    let bottom = canvas.size().y - HUD_MARGIN - HUD_LINE_HEIGHT;
    canvas.draw_text(&status_line(world), DVec2::new(HUD_MARGIN, bottom), style);

    if world.controls().is_paused() {
        let at = DVec2::new(HUD_MARGIN, bottom - HUD_LINE_HEIGHT);
        canvas.draw_text("PAUSED", at, style);
    }
}

/// Bottom-left HUD text: speed multiplier and simulated day count.
pub fn status_line(world: &World) -> String {
    let days = world.elapsed() * DAYS_PER_SECOND;
    format!("Speed: {:.2}x   Day {:.0}", world.controls().speed(), days.floor())
}
