/// Human pool labels with a fixed canonical identifier.
const POOL_ALIASES: &[(&str, &str)] = &[
    ("hot pool", "eshot"),
    ("cold pool", "escold"),
    ("frozen pool", "esfrozen"),
    ("warm pool", "eswarm"),
    ("system pool", "system"),
    ("ingest pool", "esingest"),
    ("ml pool", "esml"),
];

pub fn strip_bold(s: &str) -> String {
    s.replace("**", "").trim().to_string()
}

/// Parse a cell as a number after removing bold markup and thousands
/// separators. `None` when the cell is not a finite number.
pub fn strict_number(s: &str) -> Option<f64> {
    let cleaned = s.replace("**", "").replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Lenient numeric coercion: anything unparseable becomes `0.0`.
pub fn safe_number(s: &str) -> f64 {
    strict_number(s).unwrap_or(0.0)
}

pub fn safe_int(s: &str) -> i64 {
    safe_number(s).trunc() as i64
}

pub fn canonical_pool_name(label: &str) -> String {
    let lower = strip_bold(label).to_lowercase();
    if let Some((_, canonical)) = POOL_ALIASES.iter().find(|(human, _)| *human == lower) {
        return canonical.to_string();
    }
    lower
        .strip_suffix(" pool")
        .unwrap_or(&lower)
        .replace(' ', "")
}
