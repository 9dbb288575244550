//! Closed-form depth profiles for the initial fields.
//!
//! `depth` is `row / rows`, 0 at the surface. Each channel draws its noise
//! from its own seed offset so the textures are uncorrelated.

use super::noise::value_noise;
use super::system::Grid;
use ocean_data::GridChannel;

const CO2_MIN: f64 = 80.0;
const CO2_MAX: f64 = 100.0;
const H2_VENT_INTENSITY: f64 = 100.0;
const H2_DECAY_RATE: f64 = 4.0;
const FE2_VENT_INTENSITY: f64 = 200.0;
const FE2_DECAY_RATE: f64 = 3.0;
const FE2_MIN: f64 = 50.0;
const NITROGEN_INTENSITY: f64 = 100.0;
const PHOSPHORUS_INTENSITY: f64 = 80.0;
const PHOSPHORUS_DECAY_RATE: f64 = 6.0;
const UV_SURFACE: f64 = 100.0;
const UV_ATTENUATION: f64 = 0.15;
const LIGHT_SURFACE: f64 = 100.0;
const LIGHT_ATTENUATION: f64 = 4.0;

fn channel_seed(channel: GridChannel, seed: u64) -> u64 {
    seed.wrapping_add((channel as u64 + 1).wrapping_mul(1000))
}

/// Builds the initial field for one channel.
#[must_use]
pub fn initialize(channel: GridChannel, cols: usize, rows: usize, seed: u64) -> Grid {
    let noise_seed = channel_seed(channel, seed);
    let n = move |col: usize, row: usize| value_noise(col as f64, row as f64, noise_seed);
    let depth = move |row: usize| row as f64 / rows.max(1) as f64;

    match channel {
        GridChannel::Co2 => Grid::from_fn(cols, rows, |c, r| {
            CO2_MIN + (CO2_MAX - CO2_MIN) * n(c, r)
        }),
        GridChannel::H2 => Grid::from_fn(cols, rows, |c, r| {
            H2_VENT_INTENSITY * (-H2_DECAY_RATE * (1.0 - depth(r))).exp() * (1.0 + 0.3 * n(c, r))
        }),
        GridChannel::Fe2 => Grid::from_fn(cols, rows, |c, r| {
            let v = FE2_VENT_INTENSITY
                * (-FE2_DECAY_RATE * (1.0 - depth(r))).exp()
                * (1.0 + 0.4 * n(c, r));
            v.max(FE2_MIN)
        }),
        GridChannel::Oxygen => Grid::from_fn(cols, rows, n),
        GridChannel::Nitrogen => Grid::from_fn(cols, rows, |c, r| {
            NITROGEN_INTENSITY * (-4.0 * (1.0 - depth(r))).exp() * (1.0 + 0.3 * n(c, r))
        }),
        GridChannel::Phosphorus => Grid::from_fn(cols, rows, |c, r| {
            PHOSPHORUS_INTENSITY
                * (-PHOSPHORUS_DECAY_RATE * (1.0 - depth(r))).exp()
                * (1.0 + 0.4 * n(c, r))
        }),
        GridChannel::Ch4 | GridChannel::H2s | GridChannel::Nh3 => Grid::new(cols, rows),
        GridChannel::Uv => {
            Grid::from_fn(cols, rows, |_, r| UV_SURFACE * (-UV_ATTENUATION * r as f64).exp())
        }
        GridChannel::Temperature => {
            Grid::from_fn(cols, rows, |c, r| 50.0 + 30.0 * depth(r) + 5.0 * n(c, r))
        }
        GridChannel::Ph => Grid::from_fn(cols, rows, |c, r| 6.0 + 4.0 * depth(r) + 0.5 * n(c, r)),
        GridChannel::Light => Grid::from_fn(cols, rows, |c, r| {
            LIGHT_SURFACE * (-LIGHT_ATTENUATION * depth(r)).exp() * (1.0 + 0.2 * n(c, r))
        }),
    }
}
