//! Integration tests for painting a world onto a canvas.

use orrery::prelude::*;
use orrery::scene::{self, HELP_LINES};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear(Color),
    Disc { center: DVec2, radius: f32, color: Color },
    Ring { center: DVec2, radius: f32 },
    Text { text: String, position: DVec2, style: TextStyle },
}

/// Canvas that records every call of the last frame.
struct RecordingCanvas {
    size: DVec2,
    calls: Vec<Call>,
    presented: usize,
}

impl RecordingCanvas {
    fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            calls: Vec::new(),
            presented: 0,
        }
    }

    fn rings(&self) -> Vec<(DVec2, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Ring { center, radius } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    type Error = std::convert::Infallible;

    fn size(&self) -> DVec2 {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.calls.clear();
        self.calls.push(Call::Clear(color));
    }

    fn fill_circle(&mut self, center: DVec2, radius: f32, color: Color) {
        self.calls.push(Call::Disc { center, radius, color });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f32, _width: f32, _color: Color) {
        self.calls.push(Call::Ring { center, radius });
    }

    fn draw_text(&mut self, text: &str, position: DVec2, style: TextStyle) {
        self.calls.push(Call::Text {
            text: text.to_string(),
            position,
            style,
        });
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.presented += 1;
        Ok(())
    }
}

fn painted(world: &World) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::new(1920.0, 1000.0);
    scene::draw(world, &mut canvas);
    canvas
}

#[test]
fn test_frame_starts_with_clear() {
    let canvas = painted(&World::solar_system().unwrap());
    assert_eq!(canvas.calls.first(), Some(&Call::Clear(scene::BACKGROUND)));
    assert_eq!(canvas.presented, 0);
}

#[test]
fn test_one_ring_per_orbiting_body() {
    let world = World::solar_system().unwrap();
    let canvas = painted(&world);
    let orbiting = world.bodies().iter().filter(|b| b.is_orbiting()).count();
    assert_eq!(canvas.rings().len(), orbiting);
    assert_eq!(orbiting, SOLAR_SYSTEM.len() - 1);
}

#[test]
fn test_planet_rings_circle_the_screen_centre() {
    let mut world = World::solar_system().unwrap();
    world.step(3.3);
    let canvas = painted(&world);
    let centre = DVec2::new(960.0, 500.0);

    for spec in SOLAR_SYSTEM.iter().filter(|s| s.parent == Some("Sun")) {
        let found = canvas
            .rings()
            .into_iter()
            .any(|(c, r)| c == centre && r == spec.orbit_radius_px as f32);
        assert!(found, "no ring for {}", spec.name);
    }
}

#[test]
fn test_moon_ring_follows_its_planet() {
    let mut world = World::solar_system().unwrap();
    world.step(1.9);
    let earth = world.body(world.find("Earth").unwrap()).unwrap().position();
    let expected = scene::to_screen(DVec2::new(960.0, 500.0), earth);

    let canvas = painted(&world);
    assert!(canvas
        .rings()
        .into_iter()
        .any(|(c, r)| (c - expected).length() < 1e-9 && r == 7.0));
}

#[test]
fn test_every_body_gets_a_disc() {
    let world = World::solar_system().unwrap();
    let canvas = painted(&world);
    let discs: Vec<_> = canvas
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Disc { .. }))
        .collect();
    assert_eq!(discs.len(), world.bodies().len());

    // Sun sits dead centre at t = 0
    assert!(canvas.calls.contains(&Call::Disc {
        center: DVec2::new(960.0, 500.0),
        radius: 5.0,
        color: Color::YELLOW,
    }));
}

#[test]
fn test_labels_for_star_and_planets_only() {
    let canvas = painted(&World::solar_system().unwrap());
    let texts = canvas.texts();

    for spec in SOLAR_SYSTEM {
        let labelled = texts.contains(&spec.name);
        assert_eq!(labelled, spec.style.labelled(), "label mismatch for {}", spec.name);
    }
}

#[test]
fn test_label_sits_below_disc() {
    let world = World::solar_system().unwrap();
    let canvas = painted(&world);
    let jupiter = world.body(world.find("Jupiter").unwrap()).unwrap();
    let disc = scene::to_screen(DVec2::new(960.0, 500.0), jupiter.position());

    let label = canvas.calls.iter().find_map(|c| match c {
        Call::Text { text, position, style } if text == "Jupiter" => Some((*position, *style)),
        _ => None,
    });
    let (position, style) = label.expect("Jupiter label");
    assert_eq!(style.align, Align::Center);
    assert_eq!(position.x, disc.x);
    assert!(position.y > disc.y + jupiter.radius_px() as f64);
}

#[test]
fn test_hud_shows_help_and_status() {
    let mut world = World::solar_system().unwrap();
    world.frame([ControlEvent::SpeedUp], 1.0);
    let canvas = painted(&world);
    let texts = canvas.texts();

    for line in HELP_LINES {
        assert!(texts.contains(&line), "missing help line {line:?}");
    }
    assert!(texts.contains(&"Speed: 2.00x   Day 120"));
    assert!(!texts.contains(&"PAUSED"));
}

#[test]
fn test_hud_shows_paused() {
    let mut world = World::solar_system().unwrap();
    world.frame([ControlEvent::TogglePause], 1.0);
    let canvas = painted(&world);
    assert!(canvas.texts().contains(&"PAUSED"));
    assert!(canvas.texts().contains(&"Speed: 1.00x   Day 0"));
}

#[test]
fn test_canvas_size_moves_the_centre() {
    let world = World::solar_system().unwrap();
    let mut canvas = RecordingCanvas::new(800.0, 600.0);
    scene::draw(&world, &mut canvas);
    assert!(canvas
        .rings()
        .iter()
        .any(|(c, _)| *c == DVec2::new(400.0, 300.0)));
}
