//! Fixed-format templates for string columns.
//!
//! A column's `format` is one of two things:
//!
//! - a **date pattern** such as `mm/dd/yyyy`, recognised by its leading
//!   token (see [`DATE_PREFIXES`]) and matched by an exact parse;
//! - a **positional template** such as `###-###-####`, where `#` stands for
//!   any decimal digit and every other character must match literally.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Leading tokens that mark a format string as a date pattern.
///
/// Matched case-insensitively against the start of the format, so `dress`
/// is positional while `dd-something` is a date.
pub const DATE_PREFIXES: [&str; 10] = [
    "mm", "m/", "m-", "m.", "dd", "d/", "d-", "d.", "d ", "yyyy",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Indexed from Monday, like [`Weekday::num_days_from_monday`].
const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Two-digit years at or below this value land in the 2000s.
const TWO_DIGIT_YEAR_PIVOT: u32 = 49;

/// Why a field failed its fixed-format template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatViolation {
    /// Field length differs from the positional template's length.
    LengthMismatch,
    /// A `#` position holds a non-digit (1-based position).
    DigitMismatch { position: usize },
    /// A literal position holds a different character (1-based position).
    LiteralMismatch { position: usize },
    /// The field does not parse against the date pattern.
    InvalidDate,
}

/// A compiled `format` string.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatTemplate {
    /// Exact date/time pattern.
    Date(DatePattern),
    /// Character-by-character template.
    Positional(Vec<char>),
}

impl FormatTemplate {
    /// Compile a format string. Never fails: unknown letters are literals.
    pub fn compile(format: &str) -> Self {
        if is_date_format(format) {
            FormatTemplate::Date(DatePattern::parse(format))
        } else {
            FormatTemplate::Positional(format.chars().collect())
        }
    }

    /// Returns true if this template is a date pattern.
    pub fn is_date(&self) -> bool {
        matches!(self, FormatTemplate::Date(_))
    }

    /// Check a field against the template, returning the first violation.
    pub fn check(&self, field: &str) -> Option<FormatViolation> {
        match self {
            FormatTemplate::Date(pattern) => {
                if pattern.parse_exact(field).is_some() {
                    None
                } else {
                    Some(FormatViolation::InvalidDate)
                }
            }
            FormatTemplate::Positional(template) => check_positional(template, field),
        }
    }
}

/// Returns true if the format starts with one of the [`DATE_PREFIXES`].
pub fn is_date_format(format: &str) -> bool {
    DATE_PREFIXES.iter().any(|prefix| {
        format
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

fn check_positional(template: &[char], field: &str) -> Option<FormatViolation> {
    let field: Vec<char> = field.chars().collect();
    if field.len() != template.len() {
        return Some(FormatViolation::LengthMismatch);
    }

    for (i, (&expected, &actual)) in template.iter().zip(field.iter()).enumerate() {
        if expected == '#' {
            if !actual.is_ascii_digit() {
                return Some(FormatViolation::DigitMismatch { position: i + 1 });
            }
        } else if expected != actual {
            return Some(FormatViolation::LiteralMismatch { position: i + 1 });
        }
    }

    None
}

/// Numeric component a date token fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Year,
    ShortYear,
    Month,
    Day,
    Hour24,
    Hour12,
    Minute,
    Second,
    Fraction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DateToken {
    Numeric {
        field: DateField,
        min_digits: usize,
        max_digits: usize,
    },
    MonthName { abbreviated: bool },
    WeekdayName { abbreviated: bool },
    Designator { short: bool },
    Literal(char),
}

/// A tokenized date/time pattern (`yyyy-MM-dd`, `M/d/yyyy`, `dd MMM yyyy HH:mm`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    tokens: Vec<DateToken>,
}

impl DatePattern {
    /// Tokenize a pattern.
    ///
    /// `M` is month and `m` is minutes wherever it appears, so `mm/dd/yyyy`
    /// reads minutes, day and year.
    pub fn parse(format: &str) -> Self {
        let chars: Vec<char> = format.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let run = chars[i..].iter().take_while(|&&x| x == c).count();

            match c {
                'y' | 'Y' => {
                    tokens.push(match run {
                        1 => numeric(DateField::ShortYear, 1, 2),
                        2 => numeric(DateField::ShortYear, 2, 2),
                        _ => numeric(DateField::Year, 4, 4),
                    });
                }
                'M' => tokens.push(month_token(run)),
                'm' => tokens.push(numeric(DateField::Minute, run.min(2), 2)),
                'd' | 'D' => {
                    tokens.push(match run {
                        1 => numeric(DateField::Day, 1, 2),
                        2 => numeric(DateField::Day, 2, 2),
                        3 => DateToken::WeekdayName { abbreviated: true },
                        _ => DateToken::WeekdayName { abbreviated: false },
                    });
                }
                'H' => tokens.push(numeric(DateField::Hour24, run.min(2), 2)),
                'h' => tokens.push(numeric(DateField::Hour12, run.min(2), 2)),
                's' => tokens.push(numeric(DateField::Second, run.min(2), 2)),
                'f' => {
                    let digits = run.min(9);
                    tokens.push(numeric(DateField::Fraction, digits, digits));
                }
                't' => tokens.push(DateToken::Designator { short: run == 1 }),
                '\'' | '"' => {
                    let closing = chars[i + 1..].iter().position(|&x| x == c);
                    let end = closing.map_or(chars.len(), |offset| i + 1 + offset);
                    tokens.extend(chars[i + 1..end].iter().map(|&x| DateToken::Literal(x)));
                    i = (end + 1).min(chars.len());
                    continue;
                }
                '\\' => {
                    if let Some(&escaped) = chars.get(i + 1) {
                        tokens.push(DateToken::Literal(escaped));
                    }
                    i += 2;
                    continue;
                }
                _ => tokens.extend(std::iter::repeat_n(DateToken::Literal(c), run)),
            }

            i += run;
        }

        Self { tokens }
    }

    /// Parse a field exactly: every token must match and nothing may be left over.
    pub fn parse_exact(&self, field: &str) -> Option<NaiveDateTime> {
        let chars: Vec<char> = field.chars().collect();
        let mut pos = 0;
        let mut parts = DateParts::default();

        for token in &self.tokens {
            match token {
                DateToken::Numeric {
                    field,
                    min_digits,
                    max_digits,
                } => {
                    let digits = chars[pos..]
                        .iter()
                        .take(*max_digits)
                        .take_while(|c| c.is_ascii_digit())
                        .count();
                    if digits < *min_digits {
                        return None;
                    }
                    let text: String = chars[pos..pos + digits].iter().collect();
                    parts.set(*field, text.parse().ok()?, digits);
                    pos += digits;
                }
                DateToken::MonthName { abbreviated } => {
                    let (index, len) = match_name(&chars[pos..], &MONTH_NAMES, *abbreviated)?;
                    parts.month = Some(index as u32 + 1);
                    pos += len;
                }
                DateToken::WeekdayName { abbreviated } => {
                    let (index, len) = match_name(&chars[pos..], &WEEKDAY_NAMES, *abbreviated)?;
                    parts.weekday = Weekday::try_from(index as u8).ok();
                    pos += len;
                }
                DateToken::Designator { short } => {
                    let (am, pm) = if *short { ("A", "P") } else { ("AM", "PM") };
                    if starts_with_ignore_case(&chars[pos..], am) {
                        parts.pm = Some(false);
                        pos += am.len();
                    } else if starts_with_ignore_case(&chars[pos..], pm) {
                        parts.pm = Some(true);
                        pos += pm.len();
                    } else {
                        return None;
                    }
                }
                DateToken::Literal(expected) => {
                    if chars.get(pos) != Some(expected) {
                        return None;
                    }
                    pos += 1;
                }
            }
        }

        if pos != chars.len() {
            return None;
        }

        parts.resolve()
    }
}

fn numeric(field: DateField, min_digits: usize, max_digits: usize) -> DateToken {
    DateToken::Numeric {
        field,
        min_digits,
        max_digits,
    }
}

fn month_token(run: usize) -> DateToken {
    match run {
        1 => numeric(DateField::Month, 1, 2),
        2 => numeric(DateField::Month, 2, 2),
        3 => DateToken::MonthName { abbreviated: true },
        _ => DateToken::MonthName { abbreviated: false },
    }
}

fn starts_with_ignore_case(input: &[char], candidate: &str) -> bool {
    let len = candidate.chars().count();
    input.len() >= len
        && input
            .iter()
            .zip(candidate.chars())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b))
}

/// Find the name at the start of `input`, returning its index and char length.
fn match_name(input: &[char], names: &[&str], abbreviated: bool) -> Option<(usize, usize)> {
    names.iter().enumerate().find_map(|(index, name)| {
        let candidate = if abbreviated { &name[..3] } else { name };
        starts_with_ignore_case(input, candidate).then(|| (index, candidate.len()))
    })
}

#[derive(Debug, Default)]
struct DateParts {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour24: Option<u32>,
    hour12: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    nanos: Option<u32>,
    pm: Option<bool>,
    weekday: Option<Weekday>,
}

impl DateParts {
    fn set(&mut self, field: DateField, value: u32, digits: usize) {
        match field {
            DateField::Year => self.year = Some(value as i32),
            DateField::ShortYear => {
                let century = if value <= TWO_DIGIT_YEAR_PIVOT { 2000 } else { 1900 };
                self.year = Some((century + value) as i32);
            }
            DateField::Month => self.month = Some(value),
            DateField::Day => self.day = Some(value),
            DateField::Hour24 => self.hour24 = Some(value),
            DateField::Hour12 => self.hour12 = Some(value),
            DateField::Minute => self.minute = Some(value),
            DateField::Second => self.second = Some(value),
            DateField::Fraction => {
                self.nanos = Some(value * 10u32.pow(9 - digits as u32));
            }
        }
    }

    fn resolve(self) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            self.year.unwrap_or(1),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )?;

        if let Some(weekday) = self.weekday {
            if date.weekday() != weekday {
                return None;
            }
        }

        let hour = match (self.hour24, self.hour12) {
            (Some(h), _) => h,
            (None, Some(h)) => {
                if !(1..=12).contains(&h) {
                    return None;
                }
                match self.pm {
                    Some(true) => h % 12 + 12,
                    _ => h % 12,
                }
            }
            (None, None) => 0,
        };

        let time = NaiveTime::from_hms_nano_opt(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.nanos.unwrap_or(0),
        )?;

        Some(NaiveDateTime::new(date, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_prefix_sniffing() {
        assert!(is_date_format("mm/dd/yyyy"));
        assert!(is_date_format("MM/dd/yyyy"));
        assert!(is_date_format("m/d/yyyy"));
        assert!(is_date_format("d.M.yyyy"));
        assert!(is_date_format("d MMM yyyy"));
        assert!(is_date_format("yyyy-MM-dd"));
        assert!(is_date_format("dd-something"));
        assert!(!is_date_format("dress"));
        assert!(!is_date_format("###-###-####"));
        assert!(!is_date_format("yy-MM-dd"));
        assert!(!is_date_format(""));
    }

    #[test]
    fn test_positional_template() {
        let template = FormatTemplate::compile("###-###-####");
        assert!(!template.is_date());
        assert_eq!(template.check("555-555-5555"), None);
        assert_eq!(
            template.check("555-555-55555"),
            Some(FormatViolation::LengthMismatch)
        );
        assert_eq!(
            template.check("A55-555-5555"),
            Some(FormatViolation::DigitMismatch { position: 1 })
        );
        assert_eq!(
            template.check("555_555-5555"),
            Some(FormatViolation::LiteralMismatch { position: 4 })
        );
        assert_eq!(template.check(""), Some(FormatViolation::LengthMismatch));
    }

    #[test]
    fn test_positional_literal_only() {
        let template = FormatTemplate::compile("A-B");
        assert_eq!(template.check("A-B"), None);
        assert_eq!(
            template.check("a-B"),
            Some(FormatViolation::LiteralMismatch { position: 1 })
        );
    }

    #[test]
    fn test_lowercase_m_is_minutes() {
        let template = FormatTemplate::compile("mm/dd/yyyy");
        assert!(template.is_date());
        for ok in ["01/01/2000", "12/12/2000", "13/12/2000"] {
            assert_eq!(template.check(ok), None, "{ok}");
        }
        assert_eq!(template.check("60/12/2000"), Some(FormatViolation::InvalidDate));
        assert_eq!(template.check("1/31/2020"), Some(FormatViolation::InvalidDate));
        assert_eq!(template.check("01/31/2020 "), Some(FormatViolation::InvalidDate));

        let parsed = DatePattern::parse("yyyy-mm-dd").parse_exact("2020-03-25").unwrap();
        assert_eq!(parsed.to_string(), "2020-01-25 00:03:00");
    }

    #[test]
    fn test_single_letter_components() {
        let day_minute = FormatTemplate::compile("d/m/yyyy");
        for ok in ["01/01/2000", "1/1/2000", "31/1/2000", "12/12/2000", "12/25/2000"] {
            assert_eq!(day_minute.check(ok), None, "{ok}");
        }

        let month_day = FormatTemplate::compile("M/d/yyyy");
        assert_eq!(month_day.check("1/1/2012"), None);
        assert_eq!(month_day.check("12/25/1990"), None);
        assert_eq!(month_day.check("13/1/1990"), Some(FormatViolation::InvalidDate));
    }

    #[test]
    fn test_month_day_year() {
        let template = FormatTemplate::compile("MM/dd/yyyy");
        assert_eq!(template.check("01/31/2020"), None);
        assert_eq!(template.check("02/30/2020"), Some(FormatViolation::InvalidDate));
        for bad in ["A1/01/1980", "01-01-1980", "01/01/19801", "01/01/198", "001/01/1988"] {
            assert_eq!(template.check(bad), Some(FormatViolation::InvalidDate), "{bad}");
        }
    }

    #[test]
    fn test_hour_and_minute_with_months() {
        let template = FormatTemplate::compile("M/d/yyyy hh:mm:ss tt");
        assert_eq!(template.check("5/3/2009 08:22:45 PM"), None);
        assert_eq!(template.check("5/3/2009 08:61:45 PM"), Some(FormatViolation::InvalidDate));
    }

    #[test]
    fn test_leap_day() {
        let template = FormatTemplate::compile("yyyy-MM-dd");
        assert_eq!(template.check("2024-02-29"), None);
        assert_eq!(template.check("2023-02-29"), Some(FormatViolation::InvalidDate));
    }

    #[test]
    fn test_time_components() {
        let pattern = DatePattern::parse("yyyy-MM-dd HH:mm:ss");
        let parsed = pattern.parse_exact("2021-06-15 23:59:01").unwrap();
        assert_eq!(parsed.to_string(), "2021-06-15 23:59:01");
        assert!(pattern.parse_exact("2021-06-15 24:00:00").is_none());

        let twelve_hour = DatePattern::parse("dd/MM/yyyy hh:mm tt");
        let parsed = twelve_hour.parse_exact("01/02/2021 07:30 PM").unwrap();
        assert_eq!(parsed.to_string(), "2021-02-01 19:30:00");
    }

    #[test]
    fn test_names_and_weekday_agreement() {
        let pattern = DatePattern::parse("ddd, dd MMM yyyy");
        assert!(pattern.parse_exact("Tue, 01 Jun 2021").is_some());
        assert!(pattern.parse_exact("Wed, 01 Jun 2021").is_none());

        let full = DatePattern::parse("dd MMMM yyyy");
        assert!(full.parse_exact("04 July 1976").is_some());
        assert!(full.parse_exact("04 Jul 1976").is_none());
    }

    #[test]
    fn test_quoted_literals() {
        let pattern = DatePattern::parse("yyyy'T'HH");
        assert!(pattern.parse_exact("2020T05").is_some());
        assert!(pattern.parse_exact("2020X05").is_none());
    }
}
