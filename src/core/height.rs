/// Parse a `F'II"` height string into total inches
///
/// Strings that don't follow the pattern parse to 0, which ranks them as the
/// shortest possible height rather than rejecting them.
pub fn parse_height_inches(height: &str) -> u32 {
    parse_feet_inches(height.trim()).unwrap_or(0)
}

fn parse_feet_inches(height: &str) -> Option<u32> {
    let (feet, rest) = height.split_once('\'')?;
    let inches = rest.strip_suffix('"')?;

    let feet = parse_digits(feet)?;
    let inches = parse_digits(inches)?;

    feet.checked_mul(12)?.checked_add(inches)
}

#[inline]
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
