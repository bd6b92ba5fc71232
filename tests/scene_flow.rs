//=========================================================================
// Scene Flow Integration Tests
//=========================================================================
//
// Drives the public API end to end: events enter through the engine's
// channel, reach the router on `pump()`, and move or click entities whose
// render output is recorded.
//
//=========================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use scenic_engine::prelude::*;

//--- Test Helpers ---------------------------------------------------------

fn engine() -> (Engine, scenic_engine::core::surface::CommandLog) {
    let recorder = CommandRecorder::new(200.0, 200.0);
    let log = recorder.log();
    let mut engine = Engine::builder()
        .with_surface_offset(10.0, 20.0)
        .build(recorder);
    engine.load_image("tile", Bitmap::blank(20, 20));
    (engine, log)
}

fn position(entity: &EntityRef) -> (f32, f32) {
    entity.with(|e| (e.position.x, e.position.y)).unwrap()
}

//=========================================================================
// Keyboard
//=========================================================================

#[test]
fn queued_keys_move_entity_until_blocked() {
    let (mut engine, _) = engine();
    let scene = engine.new_scene(SceneConfig::default());
    let player = engine
        .spawn_visual(&scene, "tile", VisualOptions::default().at(0.0, 50.0))
        .unwrap();
    engine
        .spawn_visual(&scene, "tile", VisualOptions::default().at(45.0, 50.0))
        .unwrap();

    engine
        .router_mut()
        .bind_key_op(keys::RIGHT, make_move(Direction::Right, player.clone(), 10.0));

    let sender = engine.event_sender().unwrap();
    for _ in 0..3 {
        sender.send(InputEvent::key_down(keys::RIGHT)).unwrap();
    }
    assert_eq!(engine.pump(), PumpControl::Continue);

    // 0 → 10 → 20 → 30 would touch the wall at 45 (30 + 20 > 45), so the
    // third step is knocked back.
    assert_eq!(position(&player), (20.0, 50.0));
}

#[test]
fn wildcard_bindings_follow_exact_match() {
    let (mut engine, _) = engine();
    let log = Rc::new(RefCell::new(Vec::new()));

    let exact = Rc::clone(&log);
    engine
        .router_mut()
        .bind_key("w", move |key: &str| exact.borrow_mut().push(format!("exact {key}")));
    let all = Rc::clone(&log);
    engine
        .router_mut()
        .bind_key("~~", move |key: &str| all.borrow_mut().push(format!("all {key}")));
    let nums = Rc::clone(&log);
    engine
        .router_mut()
        .bind_key(KeySelector::Nums, move |key: &str| nums.borrow_mut().push(format!("nums {key}")));

    let sender = engine.event_sender().unwrap();
    sender.send(InputEvent::key_down("w")).unwrap();
    sender.send(InputEvent::key_down("3")).unwrap();
    engine.pump();

    assert_eq!(
        *log.borrow(),
        vec!["exact w", "all w", "all 3", "nums 3"]
    );
    assert_eq!(engine.input().last_key().as_deref(), Some("3"));
}

//=========================================================================
// Pointer
//=========================================================================

#[test]
fn click_is_offset_and_hits_clickable_entity() {
    let (mut engine, _) = engine();
    let scene = engine.new_scene(SceneConfig::default());
    let button = engine
        .spawn_visual(&scene, "tile", VisualOptions::default().at(10.0, 10.0))
        .unwrap();
    engine
        .spawn_visual(
            &scene,
            "tile",
            VisualOptions::default().at(10.0, 10.0).with_clickable(false),
        )
        .unwrap();

    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&clicks);
    button
        .set_on_click(move |x, y| sink.borrow_mut().push((x, y)))
        .unwrap();

    // Page coordinates; the surface sits at (10, 20).
    engine.dispatch(InputEvent::MouseDown { x: 22.0, y: 32.0 });
    assert!(engine.input().is_pointer_held());
    engine.dispatch(InputEvent::MouseUp { x: 22.0, y: 32.0 });

    assert_eq!(*clicks.borrow(), vec![(12.0, 12.0)]);
    assert!(!engine.input().is_pointer_held());
}

#[test]
fn click_callback_can_delete_its_entity() {
    let (mut engine, log) = engine();
    let scene = engine.new_scene(SceneConfig::default());
    let target = engine
        .spawn_visual(&scene, "tile", VisualOptions::default().at(0.0, 0.0))
        .unwrap();

    let mut delete = target.delete_op(true);
    target.set_on_click(move |_, _| delete()).unwrap();

    log.take();
    engine.dispatch(InputEvent::MouseUp { x: 15.0, y: 25.0 });

    assert!(scene.is_empty());
    assert_eq!(log.take(), vec![DrawCommand::Clear]);
}

//=========================================================================
// Scenes
//=========================================================================

#[test]
fn capacity_two_rejects_third_entity() {
    let (mut engine, _) = engine();
    let scene = engine.new_scene(SceneConfig::default().with_capacity(2));

    assert!(engine.spawn_visual(&scene, "tile", VisualOptions::default()).is_ok());
    assert!(scene.spawn_label("b", LabelOptions::default()).is_ok());
    assert_eq!(
        engine.spawn_visual(&scene, "tile", VisualOptions::default()).err(),
        Some(SceneError::CapacityReached { capacity: 2 })
    );
    assert_eq!(scene.len(), 2);
}

#[test]
fn hidden_scene_ignores_moves_and_clicks() {
    let (mut engine, _) = engine();
    let scene = engine.new_scene(SceneConfig::default().hidden(true));
    let entity = engine
        .spawn_visual(&scene, "tile", VisualOptions::default().at(0.0, 0.0))
        .unwrap();

    let clicked = Rc::new(Cell::new(false));
    let flag = Rc::clone(&clicked);
    entity.set_on_click(move |_, _| flag.set(true)).unwrap();

    make_default_move(Direction::Down, entity.clone())();
    engine.dispatch(InputEvent::MouseUp { x: 15.0, y: 25.0 });

    assert_eq!(position(&entity), (0.0, 0.0));
    assert!(!clicked.get());

    let mut show = scene.visibility_op(true);
    show();
    engine.dispatch(InputEvent::MouseUp { x: 15.0, y: 25.0 });
    assert!(clicked.get());
}

#[test]
fn debug_overlay_outlines_visuals() {
    let (mut engine, log) = engine();
    let scene = engine.new_scene(SceneConfig::default());
    engine
        .spawn_visual(&scene, "tile", VisualOptions::default().at(5.0, 5.0))
        .unwrap();

    assert_eq!(engine.run_command("dbg cbox", None), "scenic debug cbox | set to true");
    log.take();
    scene.render().unwrap();

    assert!(log
        .take()
        .contains(&DrawCommand::StrokeRect { x: 5.0, y: 5.0, width: 20.0, height: 20.0 }));
    assert_eq!(
        engine.run_command("dbg mximnm", Some(&scene)),
        "scenic debug mximnm | 400 sprites"
    );
}
