//! Headless frame helpers for widget tests.

use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, Ui};

/// Screen used by every test frame. 619 wide fits a 595 page plus the desk
/// margin at scale 1.
pub fn screen() -> Rect {
    Rect::from_min_max(Pos2::ZERO, Pos2::new(619.0, 1000.0))
}

/// Run one frame with `events`, drawing `add_contents` in a frameless central panel.
pub fn run_frame(ctx: &egui::Context, events: Vec<Event>, mut add_contents: impl FnMut(&mut Ui)) {
    let input = RawInput {
        screen_rect: Some(screen()),
        events,
        ..Default::default()
    };
    let _ = ctx.run(input, |ctx| {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| add_contents(ui));
    });
}

pub fn moved(pos: Pos2) -> Event {
    Event::PointerMoved(pos)
}

pub fn pressed(pos: Pos2) -> Event {
    button(pos, true)
}

pub fn released(pos: Pos2) -> Event {
    button(pos, false)
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::NONE,
    }
}

/// Frames for a full click at `pos`: hover, press, release.
pub fn click(pos: Pos2) -> Vec<Vec<Event>> {
    vec![vec![moved(pos)], vec![pressed(pos)], vec![released(pos)]]
}
