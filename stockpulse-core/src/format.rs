//! Display formatting for Indian-market figures.

/// Rupee price with two decimals: `₹2550.75`.
pub fn format_price(price: f64) -> String {
    format!("₹{price:.2}")
}

/// Volume in crores, lakhs or thousands: `1.23 Cr`, `45.00 L`, `9.50 K`.
pub fn format_volume(volume: u64) -> String {
    let v = volume as f64;
    if volume >= 10_000_000 {
        format!("{:.2} Cr", v / 10_000_000.0)
    } else if volume >= 100_000 {
        format!("{:.2} L", v / 100_000.0)
    } else if volume >= 1_000 {
        format!("{:.2} K", v / 1_000.0)
    } else {
        volume.to_string()
    }
}

/// Indian digit grouping with at most three fraction digits: `12,34,567.5`.
///
/// The last three integer digits form one group; the rest are grouped in pairs.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && rounded.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_indian(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Signed change with two decimals: `+45.25`, `-12.35`.
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.2}")
    } else {
        format!("{change:.2}")
    }
}
