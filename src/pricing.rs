/// Parse a free-text price ("R$ 1.234,56", "100", "75,90") into a decimal
/// value. Everything except digits and the comma decimal separator is
/// stripped, so thousands dots disappear before parsing.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.replace(',', ".").parse().ok()
}

/// Render a free-text price as a pt-BR currency display string.
/// Unparseable input renders as "R$ 0,00".
pub fn format_price(raw: &str) -> String {
    format_brl(parse_price(raw).unwrap_or(0.0))
}

/// "R$ 1.234,56" — dot thousands grouping, comma decimals.
pub fn format_brl(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{}R$ {},{:02}", sign, grouped, frac)
}

/// Percentage drop between two display prices, rounded to the nearest whole
/// percent. Returns "0%" when either side fails to parse or is non-positive
/// rather than failing — the label is cosmetic.
pub fn discount_label(original: &str, sale: &str) -> String {
    let (original, sale) = match (parse_price(original), parse_price(sale)) {
        (Some(o), Some(s)) => (o, s),
        _ => return "0%".to_string(),
    };
    if original <= 0.0 || sale <= 0.0 {
        return "0%".to_string();
    }
    let pct = ((original - sale) / original) * 100.0;
    format!("{}%", pct.round() as i64)
}
