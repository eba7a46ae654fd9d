//! The five stars of the emblem, in normalized device coordinates.
//!
//! Each star is a fan of 10 triangles around its center: vertex 0 is the center, vertices 1 to 5
//! the outer points and vertices 6 to 10 the inner corners. Every star has the same topology, so
//! they all share `STAR_INDICES`.

use std::rc::Rc;

use crate::context::Context;
use crate::geometry::{Geometry, GeometryError};

/// Number of stars in the emblem.
pub const STAR_COUNT: usize = 5;

/// Number of points in every star.
pub const VERTICES_PER_STAR: usize = 11;

/// Positions of every star, `x, y, z` for each of the `VERTICES_PER_STAR` points.
#[rustfmt::skip]
pub const STARS: [[f32; VERTICES_PER_STAR * 3]; STAR_COUNT] = [
    // large star
    [
        -0.666667,  0.6,       0.0,

        -0.666667,  0.8,       0.0,
        -0.856878,  0.592705,  0.0,
        -0.784224,  0.257295,  0.0,
        -0.54911,   0.257295,  0.0,
        -0.476455,  0.592705,  0.0,

        -0.711573,  0.592713,  0.0,
        -0.739327,  0.464587,  0.0,
        -0.666667,  0.3854,    0.0,
        -0.594006,  0.464587,  0.0,
        -0.62176,   0.592713,  0.0,
    ],
    [
        -0.333,     0.8,       0.0,

        -0.3905,    0.74855,   0.0,
        -0.318378,  0.702549,  0.0,
        -0.266924,  0.791221,  0.0,
        -0.307246,  0.892026,  0.0,
        -0.38362,   0.865654,  0.0,

        -0.343299,  0.764846,  0.0,
        -0.314124,  0.77492,   0.0,
        -0.311496,  0.819654,  0.0,
        -0.339046,  0.837226,  0.0,
        -0.358702,  0.803353,  0.0,
    ],
    [
        -0.2,       0.6,       0.0,

        -0.265997,  0.585858,  0.0,
        -0.211427,  0.50148,   0.0,
        -0.141066,  0.553253,  0.0,
        -0.152149,  0.669629,  0.0,
        -0.229361,  0.68978,   0.0,

        -0.218279,  0.573402,  0.0,
        -0.188784,  0.565704,  0.0,
        -0.174789,  0.605402,  0.0,
        -0.195635,  0.637635,  0.0,
        -0.222513,  0.617857,  0.0,
    ],
    [
        -0.2,       0.3,       0.0,

        -0.264102,  0.327472,  0.0,
        -0.237227,  0.217043,  0.0,
        -0.158906,  0.221258,  0.0,
        -0.137376,  0.334292,  0.0,
        -0.20239,   0.399936,  0.0,

        -0.223923,  0.286901,  0.0,
        -0.199087,  0.261825,  0.0,
        -0.175513,  0.289506,  0.0,
        -0.185779,  0.33169,   0.0,
        -0.215698,  0.33008,   0.0,
    ],
    [
        -0.333,     0.1,       0.0,

        -0.385391,  0.16247,   0.0,
        -0.389028,  0.0450391, 0.0,
        -0.315697,  0.00356278, 0.0,
        -0.266739,  0.0953593, 0.0,
        -0.309812,  0.193569,  0.0,

        -0.358773,  0.101773,  0.0,
        -0.342318,  0.0642566, 0.0,
        -0.313447,  0.0761366, 0.0,
        -0.312058,  0.120995,  0.0,
        -0.340071,  0.136839,  0.0,
    ],
];

/// The 10 triangles of a star.
#[rustfmt::skip]
pub const STAR_INDICES: [u32; 30] = [
    0, 6, 2,
    0, 2, 7,
    0, 1, 6,
    0, 1, 10,
    0, 5, 10,
    0, 5, 9,
    0, 4, 9,
    0, 4, 8,
    0, 3, 7,
    0, 3, 8,
];

/// The five stars, uploaded.
pub struct Emblem {
    stars: Vec<Geometry>,
}

impl Emblem {
    /// Uploads every star of `STARS` with `STAR_INDICES`.
    pub fn upload(context: &Rc<Context>) -> Result<Emblem, GeometryError> {
        let stars = STARS.iter()
                         .map(|star| Geometry::new(context, star, &STAR_INDICES))
                         .collect::<Result<Vec<_>, _>>()?;

        Ok(Emblem { stars })
    }

    /// Returns the uploaded stars, in `STARS` order.
    #[inline]
    pub fn stars(&self) -> &[Geometry] {
        &self.stars
    }
}
