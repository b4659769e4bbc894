//! Pure date normalization for heterogeneous booking input
//!
//! Clients and staff type dates in whatever shape is at hand: ISO dates,
//! Brazilian `DD/MM/YYYY`, dotted variants, an unlabeled run of eight digits,
//! or a relative word. Everything funnels into one canonical [`NaiveDate`].

use chrono::{Days, NaiveDate};

/// Relative tokens resolving to the reference day.
const TODAY_TOKENS: &[&str] = &["today", "hoje"];

/// Relative tokens resolving to the day after the reference day.
const TOMORROW_TOKENS: &[&str] = &["tomorrow", "amanha", "amanhã"];

/// A delimited layout and where its year field sits.
struct DelimitedLayout {
    format: &'static str,
    delimiter: char,
    year_first: bool,
}

/// Delimited layouts, tried in order.
const DELIMITED_LAYOUTS: &[DelimitedLayout] = &[
    DelimitedLayout { format: "%Y-%m-%d", delimiter: '-', year_first: true },
    DelimitedLayout { format: "%d/%m/%Y", delimiter: '/', year_first: false },
    DelimitedLayout { format: "%d-%m-%Y", delimiter: '-', year_first: false },
    DelimitedLayout { format: "%d.%m.%Y", delimiter: '.', year_first: false },
    DelimitedLayout { format: "%Y/%m/%d", delimiter: '/', year_first: true },
    DelimitedLayout { format: "%Y.%m.%d", delimiter: '.', year_first: true },
];

/// Normalize a user-supplied date against a reference "today".
///
/// Accepted forms (surrounding whitespace and letter case are ignored):
/// - `today` / `hoje`, `tomorrow` / `amanha` / `amanhã`
/// - eight digits, read as `DDMMYYYY` first and `YYYYMMDD` second; the first
///   reading that is a real calendar date wins
/// - the delimited layouts `YYYY-MM-DD`, `DD/MM/YYYY`, `DD-MM-YYYY`,
///   `DD.MM.YYYY`, `YYYY/MM/DD`, `YYYY.MM.DD`
///
/// Years are always four digits without a leading zero; `15/08/25` and
/// `15/08/0025` are not dates.
///
/// An eight-digit string can be a valid date under both readings
/// (`20111230` is 20 Nov 1230 as well as 30 Dec 2011). The day-first reading
/// always wins; callers that care should ask for a delimited form.
///
/// # Arguments
///
/// * `input` - Raw text from the client
/// * `today` - Reference date for relative tokens
///
/// # Returns
///
/// * `Some(NaiveDate)` - The canonical date
/// * `None` - When no accepted form matches
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use chairbook_domain::utils::date_normalizer::normalize_date;
///
/// let today = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();
/// let expected = NaiveDate::from_ymd_opt(2025, 8, 15);
/// assert_eq!(normalize_date("2025-08-15", today), expected);
/// assert_eq!(normalize_date("15/08/2025", today), expected);
/// assert_eq!(normalize_date("15082025", today), expected);
/// assert_eq!(normalize_date("Hoje", today), Some(today));
/// assert_eq!(normalize_date("someday", today), None);
/// ```
#[must_use]
pub fn normalize_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if TODAY_TOKENS.contains(&text.as_str()) {
        return Some(today);
    }
    if TOMORROW_TOKENS.contains(&text.as_str()) {
        return today.checked_add_days(Days::new(1));
    }

    if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        return parse_compact(&text);
    }

    DELIMITED_LAYOUTS.iter().find_map(|layout| layout.parse(&text))
}

/// Whether `date` falls strictly before `today` (calendar days only).
#[must_use]
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

impl DelimitedLayout {
    fn parse(&self, text: &str) -> Option<NaiveDate> {
        let fields: Vec<&str> = text.split(self.delimiter).collect();
        let [first, _, last] = fields.as_slice() else {
            return None;
        };
        let year = if self.year_first { first } else { last };
        if !is_full_year(year) {
            return None;
        }
        NaiveDate::parse_from_str(text, self.format).ok()
    }
}

// chrono's `%Y` takes a year of any width.
fn is_full_year(field: &str) -> bool {
    field.len() == 4 && field.bytes().all(|b| b.is_ascii_digit()) && !field.starts_with('0')
}

fn parse_compact(digits: &str) -> Option<NaiveDate> {
    let field = |range: std::ops::Range<usize>| digits.get(range)?.parse::<u32>().ok();
    let year = |range: std::ops::Range<usize>| {
        let text = digits.get(range)?;
        if !is_full_year(text) {
            return None;
        }
        text.parse::<i32>().ok()
    };

    let day_first = || NaiveDate::from_ymd_opt(year(4..8)?, field(2..4)?, field(0..2)?);
    let year_first = || NaiveDate::from_ymd_opt(year(0..4)?, field(4..6)?, field(6..8)?);

    day_first().or_else(year_first)
}
