/// Control points of the cool-to-warm diverging map (Moreland 2009), evenly
/// spaced over `[0, 1]`.
const COOLWARM: [[u8; 3]; 33] = [
    [59, 76, 192],
    [68, 90, 204],
    [77, 104, 215],
    [87, 117, 225],
    [98, 130, 234],
    [108, 142, 241],
    [119, 154, 247],
    [130, 165, 251],
    [141, 176, 254],
    [152, 185, 255],
    [163, 194, 255],
    [174, 201, 253],
    [184, 208, 249],
    [194, 213, 244],
    [204, 217, 238],
    [213, 219, 230],
    [221, 221, 221],
    [229, 216, 209],
    [236, 211, 197],
    [241, 204, 185],
    [245, 196, 173],
    [247, 187, 160],
    [247, 177, 148],
    [247, 166, 135],
    [244, 154, 123],
    [241, 141, 111],
    [236, 127, 99],
    [229, 112, 88],
    [222, 96, 77],
    [213, 80, 66],
    [203, 62, 56],
    [192, 40, 47],
    [180, 4, 38],
];

pub const LEVELS: usize = 256;

/// Colour of lookup-table entry `index` (0..=255) in a 256-level coolwarm map.
pub fn coolwarm(index: usize) -> (u8, u8, u8) {
    let t = index.min(LEVELS - 1) as f64 / (LEVELS - 1) as f64;
    let pos = t * (COOLWARM.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(COOLWARM.len() - 1);
    let frac = pos - lo as f64;

    let channel = |c: usize| {
        let a = f64::from(COOLWARM[lo][c]);
        let b = f64::from(COOLWARM[hi][c]);
        (a + (b - a) * frac).round() as u8
    };
    (channel(0), channel(1), channel(2))
}

/// Lookup-table index of `value` scaled by `max_value`: `floor(256 * value / max)`,
/// clamped into the table.
pub fn level(value: f64, max_value: f64) -> usize {
    let scaled = (LEVELS as f64 * (value / max_value)).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        (scaled as usize).min(LEVELS - 1)
    }
}
