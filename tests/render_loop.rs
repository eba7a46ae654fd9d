use red_flag::backend::headless::{Call, HeadlessEvents};
use red_flag::demo::{self, Scene};
use red_flag::emblem::STAR_COUNT;
use red_flag::window::{close_on_escape, Event, Window};
use red_flag::{Config, GlObject};

mod support;

/// Calls issued by one frame of the scene.
fn frame_calls(scene: &Scene, clear_color: [f32; 4]) -> Vec<Call> {
    let mut calls = vec![
        Call::ClearColor(clear_color),
        Call::Clear(support::COLOR_BUFFER_BIT),
        Call::UseProgram(scene.program().get_id()),
    ];

    for star in scene.emblem().stars() {
        calls.push(Call::BindVertexArray(star.vertex_array_id()));
        calls.push(Call::DrawElements {
            mode: support::TRIANGLES,
            count: 30,
            index_type: support::UNSIGNED_INT,
            offset: 0,
        });
        calls.push(Call::BindVertexArray(0));
    }

    calls.push(Call::SwapBuffers);
    calls
}

#[test]
fn frames_until_escape() {
    let (headless, context) = support::build_context();
    let scene = Scene::new(&context).unwrap();
    let config = Config::default();
    headless.clear_calls();

    const FRAMES: u64 = 4;
    let mut window = Window::new(support::escape_pressed_at(FRAMES - 1));
    window.set_key_callback(close_on_escape);

    let frames = demo::run_loop(&mut window, &context, &scene, &config).unwrap();
    assert_eq!(frames, FRAMES);
    assert_eq!(window.events().polls(), FRAMES);

    let expected: Vec<Call> = (0..FRAMES).flat_map(|_| frame_calls(&scene, config.clear_color))
                                         .collect();
    assert_eq!(headless.calls(), expected);
    assert!(headless.errors().is_empty(), "{:?}", headless.errors());
}

#[test]
fn frame_drawn_when_close_requested() {
    let (headless, context) = support::build_context();
    let scene = Scene::new(&context).unwrap();
    headless.clear_calls();

    let mut window = Window::new(HeadlessEvents::new().with_event(0, Event::CloseRequested));

    let frames = demo::run_loop(&mut window, &context, &scene, &Config::default()).unwrap();
    assert_eq!(frames, 1);

    let draws = headless.calls().iter().filter(|c| matches!(c, Call::DrawElements { .. })).count();
    assert_eq!(draws, STAR_COUNT);
}

#[test]
fn no_frame_once_closed() {
    let (headless, context) = support::build_context();
    let scene = Scene::new(&context).unwrap();
    headless.clear_calls();

    let mut window = Window::new(HeadlessEvents::new());
    window.set_should_close();

    let frames = demo::run_loop(&mut window, &context, &scene, &Config::default()).unwrap();
    assert_eq!(frames, 0);
    assert_eq!(window.events().polls(), 0);
    assert!(headless.calls().is_empty());
}

#[test]
fn framebuffer_queried_once() {
    let (headless, context) = support::build_context();
    let scene = Scene::new(&context).unwrap();
    context.set_viewport_to_framebuffer();

    let mut window = Window::new(support::escape_pressed_at(9));
    window.set_key_callback(close_on_escape);

    let frames = demo::run_loop(&mut window, &context, &scene, &Config::default()).unwrap();
    assert_eq!(frames, 10);
    assert_eq!(headless.framebuffer_queries(), 1);
    assert_eq!(headless.calls().iter().filter(|c| matches!(c, Call::Viewport(..))).count(), 1);
}

#[test]
fn clear_color_from_config() {
    let (headless, context) = support::build_context();
    let scene = Scene::new(&context).unwrap();
    headless.clear_calls();

    let config = Config { clear_color: [0.0, 0.25, 0.5, 1.0], ..Config::default() };
    let mut window = Window::new(support::escape_pressed_at(0));
    window.set_key_callback(close_on_escape);

    demo::run_loop(&mut window, &context, &scene, &config).unwrap();
    assert_eq!(headless.calls()[0], Call::ClearColor([0.0, 0.25, 0.5, 1.0]));
}

#[test]
fn shutdown_releases_everything() {
    let (headless, context) = support::build_context();
    let scene = Scene::new(&context).unwrap();

    let mut window = Window::new(support::escape_pressed_at(2));
    window.set_key_callback(close_on_escape);
    demo::run_loop(&mut window, &context, &scene, &Config::default()).unwrap();

    headless.clear_calls();
    drop(scene);

    let calls = headless.calls();
    let count = |f: fn(&Call) -> bool| calls.iter().filter(|c| f(c)).count();
    assert_eq!(count(|c| matches!(c, Call::DeleteVertexArray(_))), STAR_COUNT);
    assert_eq!(count(|c| matches!(c, Call::DeleteBuffer(_))), 2 * STAR_COUNT);
    assert_eq!(count(|c| matches!(c, Call::DeleteProgram(_))), 1);
    assert_eq!(calls.len(), 3 * STAR_COUNT + 1);

    // geometry goes before the program
    assert!(matches!(calls.last(), Some(Call::DeleteProgram(_))));

    assert_eq!(headless.live_vertex_arrays(), 0);
    assert_eq!(headless.live_buffers(), 0);
    assert_eq!(headless.live_programs(), 0);
    assert_eq!(headless.live_shaders(), 0);
    assert!(headless.errors().is_empty(), "{:?}", headless.errors());
}

#[test]
fn scene_setup_order() {
    let (headless, context) = support::build_context();
    let _scene = Scene::new(&context).unwrap();

    let calls = headless.calls();
    let link = calls.iter().position(|c| matches!(c, Call::LinkProgram(_))).unwrap();
    let first_upload = calls.iter().position(|c| matches!(c, Call::BufferData(..))).unwrap();
    assert!(link < first_upload);
    assert_eq!(calls.iter().filter(|c| matches!(c, Call::BufferData(..))).count(), 2 * STAR_COUNT);
}
