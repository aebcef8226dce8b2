//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Two decimals, optional currency prefix: `format_money(12.5, "€")` → "€12.50".
pub fn format_money(amount: f64, symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, amount.abs())
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

/// Hours with one decimal, e.g. "7.5h".
pub fn format_hours(hours: f64) -> String {
    format!("{:.1}h", hours)
}

/// Rounded percentage 0..=100 of `done` over `total`; an empty total is 0 %.
pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u32
}

/// Text progress bar of `width` cells.
pub fn progress_bar(pct: u32, width: usize) -> String {
    let filled = (pct.min(100) as usize * width) / 100;
    format!("[{}{}] {:>3}%", "#".repeat(filled), "-".repeat(width - filled), pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(50.0, ""), "50.00");
        assert_eq!(format_money(12.346, "€"), "€12.35");
        assert_eq!(format_money(-3.5, "€"), "-€3.50");
    }

    #[test]
    fn percent_rounds_and_guards_zero() {
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn progress_bar_width_is_stable() {
        assert_eq!(progress_bar(50, 10), "[#####-----]  50%");
        assert_eq!(progress_bar(0, 4), "[----]   0%");
    }
}
