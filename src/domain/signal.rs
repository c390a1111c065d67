//! Directional signal attached to each bar by a strategy.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "i8")]
pub enum Signal {
    Short,
    #[default]
    Flat,
    Long,
}

impl Signal {
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Short => -1,
            Signal::Flat => 0,
            Signal::Long => 1,
        }
    }

    pub fn as_f64(self) -> f64 {
        self.as_i8() as f64
    }

    /// Long when `ord` is Greater, Short when Less, Flat when Equal.
    pub fn from_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Greater => Signal::Long,
            Ordering::Less => Signal::Short,
            Ordering::Equal => Signal::Flat,
        }
    }
}

impl From<Signal> for i8 {
    fn from(signal: Signal) -> i8 {
        signal.as_i8()
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}
