/// Opaque 4D noise source used by noise-based transformers.
///
/// Implementations must be deterministic for a given input tuple and return values in `[-1, 1]`.
pub trait Noise4: Send + Sync {
    /// Sample the noise field.
    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64;
}

impl<F> Noise4 for F
where
    F: Fn(f64, f64, f64, f64) -> f64 + Send + Sync,
{
    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self(x, y, z, w)
    }
}

/// Seeded lattice value noise with quintic fade, smooth in all four dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueNoise4 {
    seed: u64,
}

impl ValueNoise4 {
    /// Create a noise field; equal seeds give identical fields.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed of this field.
    pub fn seed(self) -> u64 {
        self.seed
    }

    fn lattice(self, cell: [i64; 4]) -> f64 {
        let mut h = mix64(self.seed ^ 0x9E37_79B9_7F4A_7C15);
        for c in cell {
            h = mix64(h ^ (c as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93));
        }
        // 53 bits of precision.
        let unit = ((h >> 11) as f64) * (1.0 / ((1u64 << 53) as f64));
        unit * 2.0 - 1.0
    }
}

impl Noise4 for ValueNoise4 {
    fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        let coords = [x, y, z, w];
        let base = coords.map(|v| v.floor());
        let frac = [
            fade(coords[0] - base[0]),
            fade(coords[1] - base[1]),
            fade(coords[2] - base[2]),
            fade(coords[3] - base[3]),
        ];
        let cell = base.map(|v| v as i64);

        // Multilinear blend of the 16 surrounding lattice values.
        let mut acc = 0.0;
        for corner in 0u8..16 {
            let mut weight = 1.0;
            let mut at = cell;
            for axis in 0..4 {
                if corner & (1 << axis) != 0 {
                    at[axis] = at[axis].wrapping_add(1);
                    weight *= frac[axis];
                } else {
                    weight *= 1.0 - frac[axis];
                }
            }
            acc += weight * self.lattice(at);
        }
        acc.clamp(-1.0, 1.0)
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn mix64(mut z: u64) -> u64 {
    // SplitMix64 finaliser.
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/noise.rs"]
mod tests;
