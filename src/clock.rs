#[cfg(test)]
use std::cell::Cell;

use chrono::{Local, NaiveDate};

/// Source of "today" for a submission.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Counts how many times "today" was read. Used to check that a submission
/// reads the clock once.
#[cfg(test)]
#[derive(Debug)]
pub struct CountingClock<C> {
    inner: C,
    reads: Cell<usize>,
}

#[cfg(test)]
impl<C: Clock> CountingClock<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

#[cfg(test)]
impl<C: Clock> Clock for CountingClock<C> {
    fn today(&self) -> NaiveDate {
        self.reads.set(self.reads.get() + 1);
        self.inner.today()
    }
}
