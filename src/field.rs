//! Range-checked parameter values.

use std::cmp::Ordering;
use std::fmt;

use crate::command::FieldSpec;
use crate::error::{Error, Result};

/// A value constrained to the inclusive range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedField<T> {
    value: T,
    min: T,
    max: T,
}

impl<T: Copy + PartialOrd> ValidatedField<T> {
    /// `value` is stored as given, unchecked.
    pub fn new(value: T, min: T, max: T) -> Self {
        Self { value, min, max }
    }

    /// True if `value` lies inside `[min, max]`. NaN never does.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Assign `value` if it is in range. Returns `false` and keeps the old
    /// value otherwise.
    pub fn try_set(&mut self, value: T) -> bool {
        if self.contains(value) {
            self.value = value;
            true
        } else {
            false
        }
    }

    pub fn get(&self) -> T {
        self.value
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }
}

/// Conversion between a field value and its text form on the command link.
pub trait WireValue: Copy + PartialOrd + fmt::Debug {
    /// Parse the text the instrument prints for this value.
    fn parse_wire(text: &str) -> Option<Self>;

    /// Format the value the way the instrument expects it.
    fn format_wire(self, precision: usize) -> String;

    /// Convert a range bound from the metadata table.
    fn from_bound(bound: f64) -> Self;
}

impl WireValue for bool {
    /// Only `1` is true; anything else reads as false.
    fn parse_wire(text: &str) -> Option<Self> {
        Some(text.trim() == "1")
    }

    fn format_wire(self, _precision: usize) -> String {
        let text = if self { "1" } else { "0" };
        text.to_string()
    }

    fn from_bound(bound: f64) -> Self {
        bound != 0.0
    }
}

impl WireValue for u8 {
    fn parse_wire(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn format_wire(self, _precision: usize) -> String {
        self.to_string()
    }

    fn from_bound(bound: f64) -> Self {
        bound as u8
    }
}

impl WireValue for u16 {
    fn parse_wire(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn format_wire(self, _precision: usize) -> String {
        self.to_string()
    }

    fn from_bound(bound: f64) -> Self {
        bound as u16
    }
}

impl WireValue for f32 {
    fn parse_wire(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    /// At least `precision` decimals; more when fewer would not read back
    /// as the same value.
    fn format_wire(self, precision: usize) -> String {
        let fixed = format!("{:.*}", precision, self);
        if fixed.parse::<f32>() == Ok(self) {
            fixed
        } else {
            self.to_string()
        }
    }

    fn from_bound(bound: f64) -> Self {
        bound as f32
    }
}

/// An `HH:MM:SS.hh` duration. Parts are validated separately and never
/// carry into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeValue {
    hour: ValidatedField<u8>,
    minute: ValidatedField<u8>,
    second: ValidatedField<u8>,
    hundredth: ValidatedField<u8>,
}

impl Default for TimeValue {
    fn default() -> Self {
        Self::zero()
    }
}

impl TimeValue {
    pub fn zero() -> Self {
        Self {
            hour: ValidatedField::new(0, 0, 23),
            minute: ValidatedField::new(0, 0, 59),
            second: ValidatedField::new(0, 0, 59),
            hundredth: ValidatedField::new(0, 0, 99),
        }
    }

    /// Build a value from its parts, keeping zero for any part out of range.
    pub fn new(hour: u8, minute: u8, second: u8, hundredth: u8) -> Self {
        let mut time = Self::zero();
        time.try_set(hour, minute, second, hundredth);
        time
    }

    /// Build a value from a number of seconds, rounded to hundredths.
    /// Anything at or beyond 24 hours saturates to `23:59:59.99`.
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self::zero();
        }
        let total = (seconds * 100.0).round() as u64;
        let total = total.min(24 * 360_000 - 1);
        Self::new(
            (total / 360_000) as u8,
            ((total / 6_000) % 60) as u8,
            ((total / 100) % 60) as u8,
            (total % 100) as u8,
        )
    }

    /// Assign each part independently. Returns `true` only if every part was
    /// accepted.
    pub fn try_set(&mut self, hour: u8, minute: u8, second: u8, hundredth: u8) -> bool {
        let h = self.hour.try_set(hour);
        let m = self.minute.try_set(minute);
        let s = self.second.try_set(second);
        let hh = self.hundredth.try_set(hundredth);
        h && m && s && hh
    }

    pub fn hour(&self) -> u8 {
        self.hour.get()
    }

    pub fn minute(&self) -> u8 {
        self.minute.get()
    }

    pub fn second(&self) -> u8 {
        self.second.get()
    }

    pub fn hundredth(&self) -> u8 {
        self.hundredth.get()
    }

    pub fn parts(&self) -> [u8; 4] {
        [self.hour(), self.minute(), self.second(), self.hundredth()]
    }

    /// True when every part is zero.
    pub fn is_zero(&self) -> bool {
        self.parts() == [0; 4]
    }

    pub fn to_seconds(&self) -> f64 {
        f64::from(self.hour()) * 3600.0
            + f64::from(self.minute()) * 60.0
            + f64::from(self.second())
            + f64::from(self.hundredth()) / 100.0
    }

    /// Split `HH:MM:SS.hh` into its four parts. No range check.
    pub fn parse_parts(text: &str) -> Option<[u8; 4]> {
        let mut colon = text.trim().split(':');
        let hour = colon.next()?.trim().parse().ok()?;
        let minute = colon.next()?.trim().parse().ok()?;
        let rest = colon.next()?;
        if colon.next().is_some() {
            return None;
        }
        let (second, hundredth) = rest.split_once('.')?;
        Some([
            hour,
            minute,
            second.trim().parse().ok()?,
            hundredth.trim().parse().ok()?,
        ])
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:02}",
            self.hour(),
            self.minute(),
            self.second(),
            self.hundredth()
        )
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts().cmp(&other.parts())
    }
}

/// Borrowed view of one field, as addressed through the command table.
#[derive(Debug, Clone, Copy)]
pub enum FieldRef<'a> {
    Flag(&'a ValidatedField<bool>),
    Byte(&'a ValidatedField<u8>),
    Count(&'a ValidatedField<u16>),
    Real(&'a ValidatedField<f32>),
    Time(&'a TimeValue),
}

impl FieldRef<'_> {
    /// Wire text for the field.
    pub fn format(&self, spec: &FieldSpec) -> String {
        match self {
            FieldRef::Flag(f) => f.get().format_wire(spec.precision),
            FieldRef::Byte(f) => f.get().format_wire(spec.precision),
            FieldRef::Count(f) => f.get().format_wire(spec.precision),
            FieldRef::Real(f) => f.get().format_wire(spec.precision),
            FieldRef::Time(t) => t.to_string(),
        }
    }
}

/// Mutable view of one field, as addressed through the command table.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Flag(&'a mut ValidatedField<bool>),
    Byte(&'a mut ValidatedField<u8>),
    Count(&'a mut ValidatedField<u16>),
    Real(&'a mut ValidatedField<f32>),
    Time(&'a mut TimeValue),
}

impl FieldMut<'_> {
    /// Parse `text` and assign it. On any error the field keeps its value;
    /// a time value is only assigned when all four parts are in range.
    pub fn set_text(&mut self, spec: &FieldSpec, text: &str) -> Result<()> {
        match self {
            FieldMut::Flag(f) => set_wire(&mut **f, spec, text),
            FieldMut::Byte(f) => set_wire(&mut **f, spec, text),
            FieldMut::Count(f) => set_wire(&mut **f, spec, text),
            FieldMut::Real(f) => set_wire(&mut **f, spec, text),
            FieldMut::Time(t) => {
                let [h, m, s, hh] = TimeValue::parse_parts(text).ok_or_else(|| Error::Parse {
                    field: spec.name,
                    text: text.trim().to_string(),
                })?;
                let mut candidate = **t;
                if candidate.try_set(h, m, s, hh) {
                    **t = candidate;
                    Ok(())
                } else {
                    Err(Error::OutOfRange {
                        field: spec.name,
                        value: text.trim().to_string(),
                        min: TimeValue::zero().to_string(),
                        max: "23:59:59.99".to_string(),
                    })
                }
            }
        }
    }
}

fn set_wire<T: WireValue>(field: &mut ValidatedField<T>, spec: &FieldSpec, text: &str) -> Result<()> {
    let value = T::parse_wire(text).ok_or_else(|| Error::Parse {
        field: spec.name,
        text: text.trim().to_string(),
    })?;
    if field.try_set(value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            field: spec.name,
            value: text.trim().to_string(),
            min: field.min().format_wire(spec.precision),
            max: field.max().format_wire(spec.precision),
        })
    }
}

impl<T: WireValue> ValidatedField<T> {
    /// Build a field whose range comes from the command table. The value
    /// starts at the lower bound until defaults are applied.
    pub fn from_spec(spec: &FieldSpec) -> Self {
        let min = T::from_bound(spec.min);
        Self::new(min, min, T::from_bound(spec.max))
    }
}
