//! Pattern-keyed cache of compiled date parsers.
//!
//! Patterns use strftime syntax (`%d-%b-%y`). Compiling a pattern never
//! fails eagerly: a malformed pattern is remembered and reported on the
//! first parse attempt that uses it. Fields a pattern leaves out default to
//! 1900-01-01T00:00:00, so `%b %Y` or `%H:%M` parse on their own.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::format::{self, Item, ParseResult, Parsed, StrftimeItems};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_DATE_PATTERN: &str = "%d-%b-%y";

/// Compiled parser for one date pattern.
///
/// Parsed values are epoch milliseconds interpreted as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParser {
    pattern: String,
    compile_error: Option<String>,
}

impl DateParser {
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        let compile_error = StrftimeItems::new(pattern)
            .any(|item| matches!(item, Item::Error))
            .then(|| "unsupported or malformed format specifier".to_owned());

        Self {
            pattern: pattern.to_owned(),
            compile_error,
        }
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.compile_error.is_none()
    }

    pub fn parse(&self, value: &str) -> ChartResult<f64> {
        if let Some(reason) = &self.compile_error {
            return Err(ChartError::InvalidDatePattern {
                pattern: self.pattern.clone(),
                reason: reason.clone(),
            });
        }

        let fail = |reason: String| ChartError::DateParse {
            pattern: self.pattern.clone(),
            value: value.to_owned(),
            reason,
        };

        let mut parsed = Parsed::default();
        format::parse(&mut parsed, value, StrftimeItems::new(&self.pattern))
            .map_err(|e| fail(e.to_string()))?;
        fill_missing_fields(&mut parsed).map_err(|e| fail(e.to_string()))?;

        let offset = parsed.offset().unwrap_or(0);
        let local = parsed
            .to_naive_datetime_with_offset(offset)
            .map_err(|e| fail(e.to_string()))?;
        let millis = local.and_utc().timestamp_millis() - i64::from(offset) * 1_000;
        Ok(millis as f64)
    }
}

/// Defaults every field the pattern left out to 1900-01-01T00:00:00.
///
/// Week-based and ISO dates keep their own resolution; a parsed unix
/// timestamp already pins the instant.
fn fill_missing_fields(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.timestamp().is_some() {
        return Ok(());
    }

    let iso_date = parsed.isoyear().is_some()
        || parsed.isoyear_div_100().is_some()
        || parsed.isoyear_mod_100().is_some()
        || parsed.isoweek().is_some();
    if !iso_date {
        if parsed.year().is_none()
            && parsed.year_div_100().is_none()
            && parsed.year_mod_100().is_none()
        {
            parsed.set_year(1900)?;
        }
        let week_date = parsed.ordinal().is_some()
            || parsed.week_from_sun().is_some()
            || parsed.week_from_mon().is_some();
        if !week_date {
            if parsed.month().is_none() {
                parsed.set_month(1)?;
            }
            if parsed.day().is_none() {
                parsed.set_day(1)?;
            }
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        (None, Some(_)) => parsed.set_ampm(false)?,
        _ => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

/// Lazily populated `pattern -> parser` map.
///
/// Entries are never evicted. The cache is deliberately `!Sync`: charts
/// share one instance through `Rc` on a single-threaded host. A
/// multi-threaded host needs one cache per worker.
#[derive(Debug, Default)]
pub struct DateParserCache {
    parsers: RefCell<HashMap<String, Rc<DateParser>>>,
    compilations: Cell<u64>,
}

impl DateParserCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the parser for `pattern`, compiling it on first use.
    pub fn get(&self, pattern: &str) -> Rc<DateParser> {
        if let Some(parser) = self.parsers.borrow().get(pattern) {
            return Rc::clone(parser);
        }

        let parser = Rc::new(DateParser::compile(pattern));
        self.compilations.set(self.compilations.get() + 1);
        trace!(pattern, valid = parser.is_valid(), "compiled date parser");
        self.parsers
            .borrow_mut()
            .insert(pattern.to_owned(), Rc::clone(&parser));
        parser
    }

    pub fn parse(&self, pattern: &str, value: &str) -> ChartResult<f64> {
        self.get(pattern).parse(value)
    }

    /// Number of patterns compiled so far.
    #[must_use]
    pub fn compilations(&self) -> u64 {
        self.compilations.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.borrow().is_empty()
    }
}
