//! Deterministic coherent value noise used to texture the initial fields.

/// Three-octave value noise in `[0, 1]`.
#[must_use]
pub fn value_noise(x: f64, y: f64, seed: u64) -> f64 {
    let scale1 = 0.1;
    let scale2 = 0.05;
    let scale3 = 0.02;
    let noise1 = hash_noise(x * scale1, y * scale1, seed) * 0.5;
    let noise2 = hash_noise(x * scale2, y * scale2, seed.wrapping_add(1)) * 0.3;
    let noise3 = hash_noise(x * scale3, y * scale3, seed.wrapping_add(2)) * 0.2;
    (noise1 + noise2 + noise3).clamp(0.0, 1.0)
}

/// Smoothstep-interpolated lattice noise.
#[must_use]
pub fn hash_noise(x: f64, y: f64, seed: u64) -> f64 {
    let ix = x.floor() as i32;
    let iy = y.floor() as i32;
    let fx = x - x.floor();
    let fy = y - y.floor();
    let ux = fx * fx * (3.0 - 2.0 * fx);
    let uy = fy * fy * (3.0 - 2.0 * fy);
    let v00 = hash(ix, iy, seed);
    let v10 = hash(ix + 1, iy, seed);
    let v01 = hash(ix, iy + 1, seed);
    let v11 = hash(ix + 1, iy + 1, seed);
    let v0 = v00 + ux * (v10 - v00);
    let v1 = v01 + ux * (v11 - v01);
    v0 + uy * (v1 - v0)
}

#[must_use]
pub fn hash(x: i32, y: i32, seed: u64) -> f64 {
    let n = (x.wrapping_mul(127) ^ y.wrapping_mul(311)) as u64 ^ seed;
    let n = n.wrapping_mul(0x517cc1b727220a95);
    let n = n ^ (n >> 32);
    (n & 0xFFFFFF) as f64 / 0xFFFFFF as f64
}
