use red_flag::backend::headless::Call;
use red_flag::emblem::{Emblem, STARS, STAR_COUNT, STAR_INDICES, VERTICES_PER_STAR};
use red_flag::{Geometry, GeometryError};

mod support;

#[test]
fn stars_read_back() {
    let (headless, context) = support::build_context();

    let emblem = Emblem::upload(&context).unwrap();
    assert_eq!(emblem.stars().len(), STAR_COUNT);

    for (star, expected) in emblem.stars().iter().zip(STARS.iter()) {
        assert_eq!(star.vertex_count(), VERTICES_PER_STAR);
        let vertices = star.read_vertices();
        assert_eq!(vertices.len(), 33);
        assert_eq!(&vertices[..], &expected[..]);
    }

    assert!(headless.errors().is_empty(), "{:?}", headless.errors());
}

#[test]
fn indices_shared_by_every_star() {
    let (_headless, context) = support::build_context();

    let emblem = Emblem::upload(&context).unwrap();

    for star in emblem.stars() {
        assert_eq!(star.index_count(), 30);
        assert_eq!(star.read_indices(), STAR_INDICES.to_vec());
    }

    assert!(STAR_INDICES.iter().all(|&i| (i as usize) < VERTICES_PER_STAR));
}

#[test]
fn each_star_owns_its_objects() {
    let (headless, context) = support::build_context();

    let emblem = Emblem::upload(&context).unwrap();

    assert_eq!(headless.live_vertex_arrays(), STAR_COUNT);
    assert_eq!(headless.live_buffers(), 2 * STAR_COUNT);

    let mut ids: Vec<_> = emblem.stars().iter().map(|s| s.vertex_array_id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), STAR_COUNT);
}

#[test]
fn attribute_layout() {
    let (headless, context) = support::build_context();

    let _geometry = Geometry::new(&context, &STARS[0], &STAR_INDICES).unwrap();

    let calls = headless.calls();
    assert!(calls.contains(&Call::VertexAttribPointer { index: 0, size: 3, stride: 12, offset: 0 }));
    assert!(calls.contains(&Call::EnableVertexAttribArray(0)));
    assert_eq!(calls.last(), Some(&Call::BindVertexArray(0)));
}

#[test]
fn index_out_of_range() {
    let (headless, context) = support::build_context();

    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    match Geometry::new(&context, &positions, &[0, 1, 3]) {
        Err(GeometryError::IndexOutOfRange { index: 3, vertex_count: 3 }) => (),
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("index 3 accepted for 3 vertices"),
    }

    // nothing was allocated
    assert!(headless.calls().is_empty());
}

#[test]
fn malformed_data() {
    let (_headless, context) = support::build_context();

    assert!(matches!(Geometry::new(&context, &[0.0; 7], &[0, 1, 2]),
                     Err(GeometryError::MalformedVertices { len: 7 })));
    assert!(matches!(Geometry::new(&context, &[0.0; 9], &[0, 1]),
                     Err(GeometryError::MalformedIndices { len: 2 })));
}

#[test]
fn drawing_needs_no_extra_state() {
    let (headless, context) = support::build_context();

    let emblem = Emblem::upload(&context).unwrap();
    let program = red_flag::Program::from_source(&context, red_flag::demo::VERTEX_SHADER_SRC,
                                                 red_flag::demo::FRAGMENT_SHADER_SRC).unwrap();

    let mut frame = context.draw();
    frame.draw(&program, emblem.stars());
    frame.finish().unwrap();

    let draws = headless.calls().iter().filter(|c| matches!(c, Call::DrawElements { .. })).count();
    assert_eq!(draws, STAR_COUNT);
    assert!(headless.errors().is_empty(), "{:?}", headless.errors());
}

#[test]
fn released_on_drop() {
    let (headless, context) = support::build_context();

    let emblem = Emblem::upload(&context).unwrap();
    headless.clear_calls();
    drop(emblem);

    let calls = headless.calls();
    assert_eq!(calls.iter().filter(|c| matches!(c, Call::DeleteVertexArray(_))).count(), 5);
    assert_eq!(calls.iter().filter(|c| matches!(c, Call::DeleteBuffer(_))).count(), 10);
    assert_eq!(headless.live_buffers(), 0);
    assert_eq!(headless.live_vertex_arrays(), 0);
}
