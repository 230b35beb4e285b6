use crate::types::Colormap;

pub type Rgb = [u8; 3];

const LUT_SIZE: usize = 256;

/// Precomputed 256-entry colour table for one `Colormap`.
#[derive(Debug, Clone)]
pub struct ColorLut {
    table: [Rgb; LUT_SIZE],
}

impl ColorLut {
    pub fn new(colormap: Colormap) -> Self {
        let mut table = [[0u8; 3]; LUT_SIZE];
        for (i, entry) in table.iter_mut().enumerate() {
            let t = i as f64 / (LUT_SIZE - 1) as f64;
            *entry = match colormap {
                Colormap::Viridis => viridis(t),
                Colormap::Gray => {
                    let v = (t * 255.0).round() as u8;
                    [v, v, v]
                }
                Colormap::Jet => jet(t),
            };
        }
        Self { table }
    }

    /// Colour for `value` on the `[vmin, vmax]` scale; `None` for missing values.
    pub fn map(&self, value: f64, vmin: f64, vmax: f64) -> Option<Rgb> {
        if value.is_nan() {
            return None;
        }
        let t = normalize(value, vmin, vmax);
        let idx = (t * (LUT_SIZE - 1) as f64).round() as usize;
        Some(self.table[idx.min(LUT_SIZE - 1)])
    }
}

/// Linear normalisation clipped to `[0, 1]`; a collapsed scale maps everything to 0.
pub fn normalize(value: f64, vmin: f64, vmax: f64) -> f64 {
    if vmax > vmin {
        ((value - vmin) / (vmax - vmin)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn viridis(t: f64) -> Rgb {
    const C: [(u8, u8, u8); 9] = [
        (68, 1, 84),
        (71, 44, 122),
        (59, 81, 139),
        (44, 113, 142),
        (33, 144, 141),
        (39, 173, 129),
        (92, 200, 99),
        (170, 220, 50),
        (253, 231, 37),
    ];
    let segs = (C.len() - 1) as f64;
    let x = t.clamp(0.0, 1.0) * segs;
    let i = x.floor() as usize;
    if i >= C.len() - 1 {
        let (r, g, b) = C[C.len() - 1];
        return [r, g, b];
    }
    let f = x - i as f64;
    let (r0, g0, b0) = C[i];
    let (r1, g1, b1) = C[i + 1];
    let lerp = |a: u8, b: u8| (a as f64 + f * (b as f64 - a as f64)).round() as u8;
    [lerp(r0, r1), lerp(g0, g1), lerp(b0, b1)]
}

fn jet(t: f64) -> Rgb {
    let channel = |center: f64| ((1.5 - (4.0 * t - center).abs()).clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(3.0), channel(2.0), channel(1.0)]
}
