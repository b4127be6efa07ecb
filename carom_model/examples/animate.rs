// Copyright 2025 the Carom Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless animation loop: builds a nested scene, ticks it, and prints the
//! structural events and the first frame's paint sequence.

use carom_model::{EventKind, ModelEvent, ModelListener, ShapeModel};
use carom_scene::{Bounds, Rgba8, RecordingPainter, ShapeKind, ShapeState};

struct PrintStructure;

impl ModelListener for PrintStructure {
    fn model_changed(&mut self, event: &ModelEvent) {
        // A structural observer skips move events cheaply.
        if event.kind == EventKind::ShapeMoved {
            return;
        }
        println!(
            "{:?}: parent={:?} index={:?} operand={:?}",
            event.kind, event.parent, event.index, event.operand
        );
    }
}

fn main() -> Result<(), carom_scene::SceneError> {
    let mut model = ShapeModel::new(Bounds::new(800, 600));
    model.add_listener(PrintStructure);

    model.add_to_root(
        ShapeState {
            delta_x: 2,
            delta_y: 3,
            width: 60,
            height: 60,
            ..ShapeState::default()
        },
        ShapeKind::Rectangle,
    )?;
    model.add_to_root(
        ShapeState {
            x: 20,
            y: 20,
            delta_x: -3,
            width: 70,
            height: 70,
            ..ShapeState::default()
        },
        ShapeKind::Oval,
    )?;
    model.add_to_root(
        ShapeState {
            x: 20,
            y: 20,
            delta_x: 3,
            delta_y: -2,
            width: 80,
            height: 60,
            ..ShapeState::default()
        },
        ShapeKind::Hexagon,
    )?;

    let carrier = model.add_to_root(
        ShapeState {
            x: 100,
            y: 100,
            delta_x: -1,
            delta_y: 2,
            width: 400,
            height: 400,
            text: Some("carrier".to_owned()),
        },
        ShapeKind::carrier(),
    )?;
    model.add(
        carrier,
        ShapeState {
            x: 30,
            y: 10,
            width: 40,
            height: 40,
            ..ShapeState::default()
        },
        ShapeKind::dynamic(Rgba8 {
            r: 150,
            g: 40,
            b: 200,
            a: 255,
        }),
    )?;

    let mut painter = RecordingPainter::new();
    model.paint(&mut painter);
    println!("frame 0: {} paint ops", painter.ops().len());

    for _ in 0..100 {
        model.tick();
    }
    let first = model.scene().shape_at(model.root(), 0)?;
    if let Some(state) = model.scene().state(first) {
        println!("rectangle after 100 ticks: ({}, {})", state.x, state.y);
    }
    Ok(())
}
