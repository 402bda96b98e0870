/// Color strings flow through the engine in several spellings ("#F00",
/// "rgba(255,0,0,1)", "#ff0000"). Aggregation by color only works if
/// equivalent spellings collapse to one key, so everything funnels through
/// [`normalize`] before being counted or compared.

pub const DEFAULT_COLOR: &str = "#ffffff";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parses a color string into RGB. Alpha components are accepted and
/// discarded. Returns `None` for unrecognized input.
pub fn parse(input: &str) -> Option<Rgb> {
    let s = input.trim().to_ascii_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(body) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_components(body);
    }

    None
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    let expand = |c: u8| (c << 4) | c;
    match hex.len() {
        3 => {
            let v = u16::from_str_radix(hex, 16).ok()?;
            Some(Rgb::new(
                expand(((v >> 8) & 0xf) as u8),
                expand(((v >> 4) & 0xf) as u8),
                expand((v & 0xf) as u8),
            ))
        }
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            if hex.len() == 8 {
                u8::from_str_radix(&hex[6..8], 16).ok()?;
            }
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

fn parse_components(body: &str) -> Option<Rgb> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| -> Option<u8> {
        let v = p.parse::<f64>().ok()?;
        if !v.is_finite() {
            return None;
        }
        Some(v.clamp(0.0, 255.0).round() as u8)
    };
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    if parts.len() == 4 {
        parts[3].parse::<f64>().ok()?;
    }
    Some(Rgb::new(r, g, b))
}

/// Canonicalizes recognized colors to lowercase `#rrggbb`. Unrecognized
/// input passes through trimmed and lowercased rather than failing, so a
/// bad color in one feature cannot take down a whole layer.
pub fn normalize(input: &str) -> String {
    match parse(input) {
        Some(rgb) => rgb.to_hex_string(),
        None => input.trim().to_ascii_lowercase(),
    }
}

pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

/// Evenly spaced ramp from `start` to `end` inclusive.
pub fn gradient(start: Rgb, end: Rgb, n: usize) -> Vec<Rgb> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| lerp(start, end, i as f64 / (n - 1) as f64))
            .collect(),
    }
}
