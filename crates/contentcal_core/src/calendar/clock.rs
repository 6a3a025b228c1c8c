use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveTime, TimeZone};

/// Time zone in which stored instants are read back as calendar days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayZone {
    /// Device time zone, daylight-saving changes included.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DayZone {
    pub fn day_of<Tz: TimeZone>(self, instant: &DateTime<Tz>) -> NaiveDate {
        match self {
            Self::Local => instant.with_timezone(&Local).date_naive(),
            Self::Fixed(offset) => instant.with_timezone(&offset).date_naive(),
        }
    }
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Zone used to place stored instants on days; the current offset by default.
    fn zone(&self) -> DayZone {
        DayZone::Fixed(*self.now().offset())
    }

    /// Current calendar day in the clock's offset.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Start of `date` in the clock's current offset.
    fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        let offset = *self.now().offset();
        offset
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
    }
}

/// Local device time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }

    fn zone(&self) -> DayZone {
        DayZone::Local
    }
}

/// A frozen instant, used to simulate "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<FixedOffset>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }

    fn zone(&self) -> DayZone {
        (**self).zone()
    }
}
