/// 8-bit HSV triple: hue in [0, 180), saturation and value in [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv8 {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Converts one RGB pixel to the 8-bit HSV convention (hue halved to fit a byte).
pub fn rgb_to_hsv8(rgb: [u8; 3]) -> Hsv8 {
    let [r, g, b] = rgb.map(f64::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = v - min;

    let s = if v > 0.0 { (255.0 * delta / v).round() } else { 0.0 };

    let h = if delta == 0.0 {
        0.0
    } else {
        let degrees = if v == r {
            60.0 * (g - b) / delta
        } else if v == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };
        let half = (degrees / 2.0).round();
        if half >= 180.0 { half - 180.0 } else { half }
    };

    Hsv8 {
        h: h as u8,
        s: s as u8,
        v: v as u8,
    }
}
