//! Dashboard HTML renderer.
//!
//! Pure view over a [`DashboardDocument`]: one card per symbol, colored by
//! change direction, with a last-update line in the header. Used both by
//! the `generate` command (static file) and the server (`GET /`).

use crate::models::{DashboardDocument, Quote};
use std::fmt::Write;

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background-color: #f0f2f5; color: #333; line-height: 1.6;
}
header {
    background: linear-gradient(135deg, #c41e3a 0%, #8b0000 100%);
    color: white; padding: 2rem 0; text-align: center;
}
header h1 { font-size: 2.5rem; margin-bottom: 0.5rem; }
.subtitle { font-size: 1.1rem; opacity: 0.9; }
.last-update { font-size: 0.9rem; opacity: 0.8; font-style: italic; }
main { max-width: 1400px; margin: 2rem auto; padding: 0 1rem; }
.stock-grid {
    display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 1.5rem;
}
.stock-card {
    background: white; border-radius: 12px; padding: 1.5rem;
    box-shadow: 0 2px 8px rgba(0,0,0,0.08); border-top: 4px solid #ddd;
}
.stock-card.positive { border-top-color: #10b981; }
.stock-card.negative { border-top-color: #ef4444; }
.stock-header h2 { font-size: 1.5rem; color: #1a1a1a; }
.company-name { color: #666; font-size: 0.9rem; margin-bottom: 1rem; }
.price-section { margin-bottom: 1.5rem; padding-bottom: 1rem; border-bottom: 1px solid #eee; }
.current-price { font-size: 2rem; font-weight: 700; color: #1a1a1a; }
.price-change { font-size: 1.1rem; font-weight: 600; }
.positive .price-change { color: #10b981; }
.negative .price-change { color: #ef4444; }
.stock-details { display: flex; flex-direction: column; gap: 0.75rem; }
.detail-row { display: flex; justify-content: space-between; font-size: 0.9rem; }
.label { color: #666; font-weight: 500; }
.value { color: #1a1a1a; font-weight: 600; }
footer {
    background-color: #1a1a1a; color: #ccc; text-align: center;
    padding: 2rem 0; margin-top: 4rem; font-size: 0.9rem;
}
"#;

/// Group an integer amount with thousands separators ("15,250,000").
fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// As above but with an explicit sign ("+75", "-120").
fn format_signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}", format_thousands(value))
    } else {
        format_thousands(value)
    }
}

fn card_class(quote: &Quote) -> &'static str {
    if quote.change > 0.0 {
        "stock-card positive"
    } else if quote.change < 0.0 {
        "stock-card negative"
    } else {
        "stock-card"
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_card(out: &mut String, quote: &Quote) {
    let _ = write!(
        out,
        r#"
            <div class="{class}">
                <div class="stock-header">
                    <h2>{symbol}</h2>
                    <p class="company-name">{name}</p>
                </div>
                <div class="price-section">
                    <p class="current-price">Rp {price}</p>
                    <p class="price-change">
                        <span class="change-amount">{change}</span>
                        <span class="change-percent">({percent:+.2}%)</span>
                    </p>
                </div>
                <div class="stock-details">
                    <div class="detail-row"><span class="label">Volume:</span><span class="value">{volume}</span></div>
                    <div class="detail-row"><span class="label">Day Range:</span><span class="value">{day_low} - {day_high}</span></div>
                    <div class="detail-row"><span class="label">52W Range:</span><span class="value">{year_low} - {year_high}</span></div>
                    <div class="detail-row"><span class="label">Market Cap:</span><span class="value">Rp {market_cap}B</span></div>
                </div>
            </div>"#,
        class = card_class(quote),
        symbol = escape(&quote.symbol),
        name = escape(&quote.name),
        price = format_thousands(quote.price),
        change = format_signed(quote.change),
        percent = quote.change_percent,
        volume = format_thousands(quote.volume as f64),
        day_low = format_thousands(quote.day_low),
        day_high = format_thousands(quote.day_high),
        year_low = format_thousands(quote.fifty_two_week_low),
        year_high = format_thousands(quote.fifty_two_week_high),
        market_cap = format_thousands(quote.market_cap / 1.0e9),
    );
}

/// Render the full dashboard page.
pub fn render_dashboard(doc: &DashboardDocument) -> String {
    let mut cards = String::new();
    for quote in &doc.stocks {
        render_card(&mut cards, quote);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Indonesian Stock Market Dashboard</title>
    <style>{style}</style>
</head>
<body>
    <header>
        <h1>Indonesian Stock Market Dashboard</h1>
        <p class="subtitle">Data from Jakarta Stock Exchange (IDX)</p>
        <p class="last-update">Last updated: {last_update}</p>
    </header>
    <main>
        <div class="stock-grid">{cards}
        </div>
    </main>
    <footer>
        <p>Scraped from public finance endpoints with automated updates</p>
    </footer>
</body>
</html>"#,
        style = STYLE,
        last_update = escape(&doc.last_update),
        cards = cards,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataQuality, QuoteSource};

    fn doc() -> DashboardDocument {
        let up = Quote {
            symbol: "BBCA.JK".to_string(),
            name: "Bank Central Asia".to_string(),
            price: 9075.0,
            previous_close: 9000.0,
            change: 75.0,
            change_percent: 0.83,
            volume: 15_250_000,
            day_high: 9120.0,
            day_low: 8950.0,
            fifty_two_week_high: 10_000.0,
            fifty_two_week_low: 8_000.0,
            market_cap: 1.118e15,
            source: QuoteSource::ChartApi,
            as_of: None,
            last_update: "2026-08-06 10:00:00".to_string(),
        };
        let mut down = up.clone();
        down.symbol = "TLKM.JK".to_string();
        down.name = "Telkom Indonesia".to_string();
        down.price = 3100.0;
        down.change = -40.0;
        down.change_percent = -1.27;

        DashboardDocument {
            stocks: vec![up, down],
            last_update: "2026-08-06 10:05:00 WIB".to_string(),
            data_quality: DataQuality::new(2, 2),
        }
    }

    #[test]
    fn test_renders_cards_with_direction_classes() {
        let html = render_dashboard(&doc());

        assert!(html.contains("BBCA.JK"));
        assert!(html.contains("Bank Central Asia"));
        assert!(html.contains(r#"class="stock-card positive""#));
        assert!(html.contains(r#"class="stock-card negative""#));
        assert!(html.contains("Last updated: 2026-08-06 10:05:00 WIB"));
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_thousands(15_250_000.0), "15,250,000");
        assert_eq!(format_thousands(690.0), "690");
        assert_eq!(format_signed(75.0), "+75");
        assert_eq!(format_signed(-120.0), "-120");
    }

    #[test]
    fn test_empty_document_renders() {
        let html = render_dashboard(&DashboardDocument::empty());
        assert!(html.contains("Last updated: Never"));
        assert!(!html.contains("stock-card positive"));
    }

    #[test]
    fn test_escapes_markup_in_names() {
        let mut document = doc();
        document.stocks[0].name = "A & B <Holdings>".to_string();
        let html = render_dashboard(&document);
        assert!(html.contains("A &amp; B &lt;Holdings&gt;"));
    }
}
