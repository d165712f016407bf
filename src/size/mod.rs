const SUFFIXES: [&str; 7] = ["bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Renders a byte count with binary magnitudes, e.g. `1.50 KB` for 1536.
pub fn format_size(value: i64, decimal_places: usize) -> String {
    if value < 0 {
        return format!("-{}", format_unsigned(value.unsigned_abs(), decimal_places));
    }
    format_unsigned(value as u64, decimal_places)
}

fn format_unsigned(value: u64, decimal_places: usize) -> String {
    if value == 0 {
        return format!("{:.*} bytes", decimal_places, 0.0);
    }

    let mut mag = (63 - value.leading_zeros() as usize) / 10;
    let mut adjusted = value as f64 / (1u64 << (mag * 10)) as f64;

    let scale = 10f64.powi(decimal_places as i32);
    if (adjusted * scale).round() / scale >= 1000.0 && mag + 1 < SUFFIXES.len() {
        mag += 1;
        adjusted /= 1024.0;
    }

    format!("{:.*} {}", decimal_places, adjusted, SUFFIXES[mag])
}
