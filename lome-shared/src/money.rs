/// Whole pesos with `.` as the thousands separator (`341000` → `341.000`).
pub fn format_ars(amount: i32) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_ars(0), "0");
        assert_eq!(format_ars(999), "999");
        assert_eq!(format_ars(8000), "8.000");
        assert_eq!(format_ars(14000), "14.000");
        assert_eq!(format_ars(341000), "341.000");
        assert_eq!(format_ars(1234567), "1.234.567");
        assert_eq!(format_ars(-6000), "-6.000");
    }
}
