// Display helpers shared by the CLI tables and the database info report.

pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

pub fn format_ratio(ratio: f64) -> String {
    format!("1:{:.2}", ratio)
}

/// Human size of a serialized payload: whole KB below 1 MB, one decimal MB above.
pub fn size_label(bytes: usize) -> String {
    let kb = (bytes as f64 / 1024.0).round() as u64;
    if kb < 1024 {
        format!("{} KB", kb)
    } else {
        format!("{:.1} MB", kb as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_label_switches_units_at_one_megabyte() {
        assert_eq!(size_label(0), "0 KB");
        assert_eq!(size_label(2048), "2 KB");
        assert_eq!(size_label(1024 * 1024), "1.0 MB");
        assert_eq!(size_label(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }

    #[test]
    fn money_keeps_sign_outside_currency_symbol() {
        assert_eq!(format_money(12.5), "$12.50");
        assert_eq!(format_money(-3.0), "-$3.00");
    }
}
