use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

const WIRE_FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const WIRE_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Source of the timestamp stamped on activities that carry none.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime;
}

/// Reads the current instant in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        Timestamp::now().to_zoned(TimeZone::UTC).datetime()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// Renders `YYYY-MM-DDThh:mm:ss.ffffff`, always with six fractional digits.
pub fn format_time(time: &DateTime) -> String {
    let micros = time.subsec_nanosecond() / 1_000;
    format!("{}.{micros:06}", time.strftime(WIRE_FORMAT_SECONDS))
}

/// Parses the wire time format. The fractional part may be shorter than six
/// digits or missing; anything after it is rejected.
pub fn parse_time(text: &str) -> Option<DateTime> {
    DateTime::strptime(WIRE_PARSE_FORMAT, text).ok()
}
