use tracing::warn;

/// Human-friendly colour names accepted in the spreadsheet's Warna column.
/// Closed set; lookups are lowercase.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("merah", "#dc2626"),
    ("biru", "#2563eb"),
    ("hijau", "#16a34a"),
    ("kuning", "#eab308"),
    ("ungu", "#7c3aed"),
    ("orange", "#ea580c"),
    ("pink", "#ec4899"),
    ("abu", "#6b7280"),
    ("abu-abu", "#6b7280"),
    ("coklat", "#92400e"),
    ("hitam", "#374151"),
    ("putih", "#ffffff"),
    ("tosca", "#06b6d4"),
    ("lime", "#84cc16"),
    ("indigo", "#4f46e5"),
];

/// CSS colour keywords the fallback computation understands. Pure black is
/// the unresolved sentinel, so the `black` keyword deliberately resolves to
/// the default colour downstream.
const CSS_KEYWORDS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("silver", "#c0c0c0"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("white", "#ffffff"),
    ("maroon", "#800000"),
    ("red", "#ff0000"),
    ("purple", "#800080"),
    ("fuchsia", "#ff00ff"),
    ("magenta", "#ff00ff"),
    ("green", "#008000"),
    ("olive", "#808000"),
    ("yellow", "#ffff00"),
    ("navy", "#000080"),
    ("blue", "#0000ff"),
    ("teal", "#008080"),
    ("aqua", "#00ffff"),
    ("cyan", "#00ffff"),
    ("brown", "#a52a2a"),
    ("gold", "#ffd700"),
    ("goldenrod", "#daa520"),
    ("salmon", "#fa8072"),
    ("coral", "#ff7f50"),
    ("tomato", "#ff6347"),
    ("orangered", "#ff4500"),
    ("darkorange", "#ff8c00"),
    ("orchid", "#da70d6"),
    ("violet", "#ee82ee"),
    ("plum", "#dda0dd"),
    ("lavender", "#e6e6fa"),
    ("khaki", "#f0e68c"),
    ("crimson", "#dc143c"),
    ("turquoise", "#40e0d0"),
    ("skyblue", "#87ceeb"),
    ("steelblue", "#4682b4"),
    ("royalblue", "#4169e1"),
    ("dodgerblue", "#1e90ff"),
    ("slategray", "#708090"),
    ("seagreen", "#2e8b57"),
    ("forestgreen", "#228b22"),
    ("limegreen", "#32cd32"),
    ("springgreen", "#00ff7f"),
    ("olivedrab", "#6b8e23"),
    ("darkgreen", "#006400"),
    ("darkblue", "#00008b"),
    ("darkred", "#8b0000"),
    ("hotpink", "#ff69b4"),
    ("deeppink", "#ff1493"),
    ("mediumpurple", "#9370db"),
    ("rebeccapurple", "#663399"),
    ("chocolate", "#d2691e"),
    ("sienna", "#a0522d"),
    ("tan", "#d2b48c"),
    ("wheat", "#f5deb3"),
    ("beige", "#f5f5dc"),
    ("ivory", "#fffff0"),
    ("azure", "#f0ffff"),
];

/// Resolve a colour token from the spreadsheet into a usable display colour.
/// Hex literals pass through verbatim, Indonesian names map via the table,
/// anything else goes through the CSS-style computation. Unrecognized tokens
/// warn and fall back to `default`. Never panics.
pub fn resolve_color(token: Option<&str>, default: &str) -> String {
    let raw = match token {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => return default.to_string(),
    };

    if is_hex_literal(raw) {
        return raw.to_string();
    }

    let lower = raw.to_lowercase();
    if let Some(&(_, hex)) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
        return hex.to_string();
    }

    if let Some((r, g, b)) = compute_css_color(&lower) {
        // A computed pure black is indistinguishable from an unresolved
        // token, so it counts as not recognized.
        if (r, g, b) != (0, 0, 0) {
            return format!("#{:02x}{:02x}{:02x}", r, g, b);
        }
    }

    warn!("Color \"{}\" not recognized, using default", raw);
    default.to_string()
}

/// `#` followed by exactly 3 or 6 hex digits, any casing.
fn is_hex_literal(s: &str) -> bool {
    let Some(digits) = s.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// CSS-style colour computation: `rgb()`/`rgba()` functional notation or a
/// keyword from the table. Input is already lowercased and trimmed.
fn compute_css_color(token: &str) -> Option<(u8, u8, u8)> {
    if let Some(rest) = token
        .strip_prefix("rgba(")
        .or_else(|| token.strip_prefix("rgb("))
    {
        let inner = rest.strip_suffix(')')?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() < 3 {
            return None;
        }
        let r: u8 = parts[0].parse().ok()?;
        let g: u8 = parts[1].parse().ok()?;
        let b: u8 = parts[2].parse().ok()?;
        return Some((r, g, b));
    }

    CSS_KEYWORDS
        .iter()
        .find(|(name, _)| *name == token)
        .and_then(|&(_, hex)| hex_to_rgb(hex))
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    let expanded: String;
    let digits = if digits.len() == 3 {
        expanded = digits.chars().flat_map(|c| [c, c]).collect();
        &expanded
    } else if digits.len() == 6 {
        digits
    } else {
        return None;
    };
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
