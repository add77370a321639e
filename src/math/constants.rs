/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Vector3f = nalgebra::Vector3<Float>;

pub const FLOAT_MIN: Float = std::f32::MIN;
pub const FLOAT_MAX: Float = std::f32::MAX;

// Faces whose doubled area or normal length falls at or below this are degenerate.
pub const DEGENERATE_EPSILON: Float = 1e-10;

// Tolerance used when checking that a normal is unit length.
pub const UNIT_TOLERANCE: Float = 1e-5;
