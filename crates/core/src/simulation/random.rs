//! Uniform random sources for spread draws
//!
//! The engine draws one value in `[0, 1)` per spread attempt. Any
//! [`rand::RngCore`] works as a source; the scripted sources here make runs
//! exactly reproducible in tests.

use rand::{Rng, RngCore};

/// Source of uniform draws in `[0, 1)`
pub trait UniformSource {
    fn next_uniform(&mut self) -> f32;
}

impl<R: RngCore> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Always returns the same value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSource(f32);

impl ConstantSource {
    /// `value` is clamped into `[0, 1)`
    pub fn new(value: f32) -> Self {
        ConstantSource(clamp_unit(value))
    }

    /// A source whose draws succeed against any non-zero probability
    pub fn always_ignite() -> Self {
        ConstantSource(0.0)
    }

    /// A source whose draws never succeed
    pub fn never_ignite() -> Self {
        ConstantSource(clamp_unit(1.0))
    }
}

impl UniformSource for ConstantSource {
    #[inline]
    fn next_uniform(&mut self) -> f32 {
        self.0
    }
}

/// Replays a fixed sequence of draws, cycling back to the start when exhausted
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values are clamped into `[0, 1)`. An empty script behaves like
    /// [`ConstantSource::always_ignite`].
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        ScriptedSource {
            values: values.into_iter().map(clamp_unit).collect(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Largest f32 strictly below 1.0
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, BELOW_ONE)
    }
}
