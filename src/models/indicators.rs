//! Technical indicator calculations over an ordered daily close series.
//!
//! All functions take closes ordered by date ascending and return values
//! rounded to 2 decimal places. Results that cannot be computed (not enough
//! history, zero denominators, non-finite intermediates) are `None`, never
//! NaN or infinity.

use crate::models::HistoricalBar;
use chrono::Datelike;

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 2 decimals, mapping non-finite values to `None`.
pub fn normalize(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(round2(value))
    } else {
        None
    }
}

/// Simple moving average over the last `period` closes.
///
/// `None` if fewer than `period` closes exist.
pub fn sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    normalize(window.iter().sum::<f64>() / period as f64)
}

/// RSI over the last `period` one-bar deltas.
///
/// Gains and losses are averaged separately (losses as positive magnitudes),
/// RSI = 100 - 100/(1 + avgGain/avgLoss). A flat window (no gains, no
/// losses) is undefined; all-gain windows saturate at 100.
pub fn rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let window = &closes[closes.len() - period - 1..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for pair in window.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gain_sum += delta;
        } else {
            loss_sum += -delta;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            return None;
        }
        return Some(100.0);
    }

    normalize(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}

/// Percentage change from the close `sessions_back` bars before the latest.
///
/// `None` if fewer than `sessions_back + 1` closes exist.
pub fn performance(closes: &[f64], sessions_back: usize) -> Option<f64> {
    if sessions_back == 0 || closes.len() < sessions_back + 1 {
        return None;
    }
    let latest = closes[closes.len() - 1];
    let base = closes[closes.len() - 1 - sessions_back];
    if base == 0.0 {
        return None;
    }
    normalize((latest / base - 1.0) * 100.0)
}

/// Percentage change from the first close of `year` to the latest close.
///
/// `None` if no bar falls in `year`.
pub fn performance_ytd(bars: &[HistoricalBar], year: i32) -> Option<f64> {
    let base = bars.iter().find(|bar| bar.date.year() == year)?.close;
    let latest = bars.last()?.close;
    if base == 0.0 {
        return None;
    }
    normalize((latest / base - 1.0) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(date: &str, close: f64) -> HistoricalBar {
        HistoricalBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_sma_insufficient_history() {
        let closes: Vec<f64> = (0..19).map(|i| 100.0 + i as f64).collect();
        assert_eq!(sma(&closes, 20), None);
    }

    #[test]
    fn test_sma_mean_of_last_window() {
        // 25 closes; the last 20 are 105..=124, mean 114.5
        let closes: Vec<f64> = (100..125).map(|i| i as f64).collect();
        assert_eq!(sma(&closes, 20), Some(114.5));

        let closes = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        assert_eq!(sma(&closes, 3), Some(14.0)); // (13+14+15)/3
    }

    #[test]
    fn test_rsi_bounds() {
        // Alternating gains and losses stays strictly inside [0, 100]
        let closes: Vec<f64> = (0..30)
            .map(|i| if i % 2 == 0 { 100.0 } else { 103.0 })
            .collect();
        let value = rsi(&closes, 14).unwrap();
        assert!(value > 0.0 && value < 100.0);
    }

    #[test]
    fn test_rsi_all_gains_saturates() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&closes, 14), Some(100.0));
    }

    #[test]
    fn test_rsi_flat_window_undefined() {
        let closes = vec![100.0; 20];
        assert_eq!(rsi(&closes, 14), None);
    }

    #[test]
    fn test_rsi_insufficient_history() {
        let closes = vec![100.0; 14]; // 13 deltas, need 14
        assert_eq!(rsi(&closes, 14), None);
    }

    #[test]
    fn test_performance_one_day() {
        let closes = vec![100.0, 102.0, 101.0, 105.0, 103.0];
        // (103/105 - 1) * 100 = -1.9047... -> -1.90
        assert_eq!(performance(&closes, 1), Some(-1.9));
    }

    #[test]
    fn test_performance_insufficient_history() {
        let closes = vec![100.0, 101.0, 102.0, 103.0];
        assert_eq!(performance(&closes, 4), None);
        assert_eq!(performance(&closes, 3), Some(3.0));
    }

    #[test]
    fn test_performance_zero_base() {
        let closes = vec![0.0, 103.0];
        assert_eq!(performance(&closes, 1), None);
    }

    #[test]
    fn test_performance_ytd() {
        let bars = vec![
            bar("2025-12-30", 90.0),
            bar("2026-01-02", 100.0),
            bar("2026-03-01", 112.0),
        ];
        assert_eq!(performance_ytd(&bars, 2026), Some(12.0));
        assert_eq!(performance_ytd(&bars, 2024), None);
    }

    #[test]
    fn test_normalize_non_finite() {
        assert_eq!(normalize(f64::NAN), None);
        assert_eq!(normalize(f64::INFINITY), None);
        assert_eq!(normalize(1.005), Some(1.01));
    }
}
