use chrono::NaiveDate;

/// Integer with comma thousands separators: `1332000` → `1,332,000`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `01-Jan-2000`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// `31/01/2000` (day first)
pub fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `Saturday`
pub fn weekday(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
