//! Formatting helpers for presenting dataset values.
//!
//! Every helper takes the resolved [`Locale`] explicitly and never fails:
//! absent values become [`PLACEHOLDER`] (or zero for plain numbers) and
//! unparsable dates are echoed back unchanged.

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, UtcOffset,
};

use super::locale::Locale;

pub const PLACEHOLDER: &str = "-";

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_PT_BR: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

struct NumberSymbols {
    group: char,
    decimal: char,
}

fn symbols(locale: Locale) -> NumberSymbols {
    match locale {
        Locale::En => NumberSymbols {
            group: ',',
            decimal: '.',
        },
        Locale::PtBr => NumberSymbols {
            group: '.',
            decimal: ',',
        },
    }
}

/// Grouped number with up to three fraction digits. `None` renders as zero.
pub fn format_number(value: Option<f64>, locale: Locale) -> String {
    format_decimal(value.unwrap_or(0.0), 0, 3, locale)
}

/// Rating with exactly two fraction digits, or the placeholder when absent.
pub fn format_rating(value: Option<f64>, locale: Locale) -> String {
    match value {
        Some(value) => format_decimal(value, 2, 2, locale),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_year(value: Option<i32>) -> String {
    value
        .map(|year| year.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `12.5%` style change label for the rising-titles table.
pub fn format_percent_change(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{value}%"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Compact axis tick for vote totals: `12M`.
pub fn format_millions(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}M", (value / 1_000_000.0).round() as i64)
}

/// Medium-style calendar date for a `YYYY-MM-DD` string.
///
/// The date is anchored at UTC midnight and rendered without any offset
/// conversion, so the result never shifts a day with the host timezone.
pub fn format_date(value: Option<&str>, locale: Locale) -> String {
    let Some(raw) = value.filter(|raw| !raw.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    match Date::parse(raw, format_description!("[year]-[month]-[day]")) {
        Ok(date) => medium_date(date, locale),
        Err(_) => raw.to_string(),
    }
}

/// Medium date + short time in the process-local offset.
pub fn format_datetime(value: Option<&str>, locale: Locale) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    format_datetime_in(value, locale, offset)
}

/// Same as [`format_datetime`] with an explicit display offset.
pub fn format_datetime_in(value: Option<&str>, locale: Locale, offset: UtcOffset) -> String {
    let Some(raw) = value.filter(|raw| !raw.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    match parse_datetime(raw, offset) {
        Some(moment) => {
            let date = medium_date(moment.date(), locale);
            let time = short_time(moment.hour(), moment.minute(), locale);
            format!("{date}, {time}")
        }
        None => raw.to_string(),
    }
}

/// Accepts RFC 3339 (converted to `offset`), a naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (already local) or a bare date (UTC midnight, converted to `offset`).
fn parse_datetime(raw: &str, offset: UtcOffset) -> Option<OffsetDateTime> {
    if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(moment.to_offset(offset));
    }

    if let Ok(naive) = PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"),
    ) {
        return Some(naive.assume_offset(offset));
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc().to_offset(offset))
}

fn medium_date(date: Date, locale: Locale) -> String {
    let month_index = usize::from(u8::from(date.month())) - 1;
    match locale {
        Locale::En => format!("{} {}, {}", MONTHS_EN[month_index], date.day(), date.year()),
        Locale::PtBr => format!(
            "{} de {} de {}",
            date.day(),
            MONTHS_PT_BR[month_index],
            date.year()
        ),
    }
}

fn short_time(hour: u8, minute: u8, locale: Locale) -> String {
    match locale {
        Locale::En => {
            let suffix = if hour < 12 { "AM" } else { "PM" };
            let display_hour = match hour % 12 {
                0 => 12,
                h => h,
            };
            format!("{display_hour}:{minute:02} {suffix}")
        }
        Locale::PtBr => format!("{hour:02}:{minute:02}"),
    }
}

fn format_decimal(value: f64, min_fraction: usize, max_fraction: usize, locale: Locale) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let fixed = round_half_away(value.abs(), max_fraction);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < min_fraction {
        fraction.push('0');
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let symbols = symbols(locale);

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, symbols.group));
    if !fraction.is_empty() {
        out.push(symbols.decimal);
        out.push_str(&fraction);
    }
    out
}

/// Rounds the shortest decimal form of `value` to `digits` places, ties
/// away from zero. `{:.N}` rounds the binary value half-to-even instead,
/// so `7.125` would come out as `7.12`.
fn round_half_away(value: f64, digits: usize) -> String {
    let shortest = value.to_string();
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut kept: Vec<u8> = int_part.bytes().collect();
    kept.extend(frac_part.bytes().take(digits));
    kept.resize(int_part.len() + digits, b'0');

    if frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let text: String = kept.iter().map(|d| char::from(*d)).collect();
    if digits == 0 {
        text
    } else {
        format!("{}.{}", &text[..split], &text[split..])
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn numbers_group_per_locale() {
        assert_eq!(format_number(Some(1_234_567.0), Locale::En), "1,234,567");
        assert_eq!(format_number(Some(1_234_567.0), Locale::PtBr), "1.234.567");
        assert_eq!(format_number(Some(999.0), Locale::En), "999");
        assert_eq!(format_number(Some(1000.0), Locale::En), "1,000");
    }

    #[test]
    fn numbers_keep_up_to_three_fraction_digits() {
        assert_eq!(format_number(Some(1234.5), Locale::En), "1,234.5");
        assert_eq!(format_number(Some(0.123_456), Locale::En), "0.123");
        assert_eq!(format_number(Some(1234.5), Locale::PtBr), "1.234,5");
        assert_eq!(format_number(Some(-98_765.25), Locale::En), "-98,765.25");
    }

    #[test]
    fn missing_number_is_zero() {
        assert_eq!(format_number(None, Locale::En), "0");
    }

    #[test]
    fn tiny_negative_rounds_without_sign() {
        assert_eq!(format_number(Some(-0.0001), Locale::En), "0");
    }

    #[test]
    fn rating_has_two_decimals() {
        assert_eq!(format_rating(Some(7.5), Locale::En), "7.50");
        assert_eq!(format_rating(Some(9.0), Locale::PtBr), "9,00");
        assert_eq!(format_rating(Some(8.456), Locale::En), "8.46");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_rating(Some(7.125), Locale::En), "7.13");
        assert_eq!(format_rating(Some(8.375), Locale::PtBr), "8,38");
        assert_eq!(format_rating(Some(9.995), Locale::En), "10.00");
        assert_eq!(format_number(Some(0.0625), Locale::En), "0.063");
        assert_eq!(format_number(Some(-2.0005), Locale::En), "-2.001");
        assert_eq!(format_number(Some(999.9995), Locale::En), "1,000");
        assert_eq!(format_rating(None, Locale::En), "-");
    }

    #[test]
    fn non_finite_values_render_placeholder() {
        assert_eq!(format_rating(Some(f64::NAN), Locale::En), "-");
        assert_eq!(format_number(Some(f64::INFINITY), Locale::En), "-");
    }

    #[test]
    fn year_or_placeholder() {
        assert_eq!(format_year(Some(1994)), "1994");
        assert_eq!(format_year(None), "-");
    }

    #[test]
    fn date_is_medium_style_and_utc_anchored() {
        assert_eq!(format_date(Some("2024-01-15"), Locale::En), "Jan 15, 2024");
        assert_eq!(
            format_date(Some("2024-01-15"), Locale::PtBr),
            "15 de jan. de 2024"
        );
        assert_eq!(format_date(Some("2023-12-31"), Locale::En), "Dec 31, 2023");
    }

    #[test]
    fn date_fallbacks() {
        assert_eq!(format_date(None, Locale::En), "-");
        assert_eq!(format_date(Some(""), Locale::En), "-");
        assert_eq!(format_date(Some("soon"), Locale::En), "soon");
        assert_eq!(
            format_date(Some("2024-01-15T10:00:00Z"), Locale::En),
            "2024-01-15T10:00:00Z"
        );
    }

    #[test]
    fn datetime_converts_into_display_offset() {
        let raw = Some("2024-01-15T18:04:00+00:00");
        assert_eq!(
            format_datetime_in(raw, Locale::En, UtcOffset::UTC),
            "Jan 15, 2024, 6:04 PM"
        );
        assert_eq!(
            format_datetime_in(raw, Locale::PtBr, offset!(-3)),
            "15 de jan. de 2024, 15:04"
        );
    }

    #[test]
    fn datetime_crossing_midnight_moves_the_date() {
        let raw = Some("2024-01-15T01:30:00Z");
        assert_eq!(
            format_datetime_in(raw, Locale::En, offset!(-5)),
            "Jan 14, 2024, 8:30 PM"
        );
    }

    #[test]
    fn naive_datetime_is_taken_as_local() {
        assert_eq!(
            format_datetime_in(Some("2024-03-02T00:05:00"), Locale::En, offset!(+9)),
            "Mar 2, 2024, 12:05 AM"
        );
    }

    #[test]
    fn datetime_fallbacks() {
        assert_eq!(format_datetime_in(None, Locale::En, UtcOffset::UTC), "-");
        assert_eq!(
            format_datetime_in(Some("not a date"), Locale::PtBr, UtcOffset::UTC),
            "not a date"
        );
    }

    #[test]
    fn percent_change_and_millions() {
        assert_eq!(format_percent_change(Some(12.5)), "12.5%");
        assert_eq!(format_percent_change(Some(100.0)), "100%");
        assert_eq!(format_percent_change(None), "-");
        assert_eq!(format_millions(12_400_000.0), "12M");
        assert_eq!(format_millions(0.0), "0M");
    }
}
