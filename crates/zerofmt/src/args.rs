//! Positional argument container.
//!
//! [`ArgList`] is an append-only, growable, insertion-ordered sequence of
//! [`ArgValue`]s, indexed by substitution number. Per-index setters report
//! whether the stored value actually changed, and an optional notification
//! hook fires at most once between explicit [`reset_changed`] calls, so a
//! consumer can treat a whole batch of mutations as a single invalidation
//! signal.
//!
//! [`reset_changed`]: ArgList::reset_changed

use std::fmt;
use std::ops::Index;

use crate::error::{FormatError, Result};
use crate::num;
use crate::value::{ArgValue, Decimals, TimerStyle};

/// Growable ordered argument sequence with change tracking.
///
/// # Example
///
/// ```rust
/// use zerofmt::{ArgList, Decimals};
///
/// let mut args = ArgList::new();
/// args.push_str("speed").push_float(12.5, Decimals::MaxNonZero(2));
/// assert_eq!(args.len(), 2);
/// assert_eq!(args[1].to_text(), "12.5");
///
/// // Setters report whether anything actually changed.
/// assert!(!args.set_str(0, "speed"));
/// assert!(args.set_str(0, "velocity"));
/// ```
pub struct ArgList<'a> {
    items: Vec<ArgValue<'a>>,
    on_changed: Option<Box<dyn FnMut() + 'a>>,
    changed: bool,
}

impl<'a> ArgList<'a> {
    pub fn new() -> Self {
        ArgList {
            items: Vec::new(),
            on_changed: None,
            changed: false,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ArgList {
            items: Vec::with_capacity(capacity),
            on_changed: None,
            changed: false,
        }
    }

    /// A list whose `hook` fires on the first mutation after construction or
    /// after each [`reset_changed`](ArgList::reset_changed).
    pub fn with_notify(hook: impl FnMut() + 'a) -> Self {
        ArgList {
            items: Vec::new(),
            on_changed: Some(Box::new(hook)),
            changed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ArgValue<'a>> {
        self.items.get(index)
    }

    /// Whether any mutation happened since the last reset.
    pub fn has_changed(&self) -> bool {
        self.changed
    }

    /// Re-arms the one-shot change notification.
    pub fn reset_changed(&mut self) {
        self.changed = false;
    }

    fn mark_changed(&mut self) {
        if self.changed {
            return;
        }
        self.changed = true;
        if let Some(hook) = self.on_changed.as_mut() {
            hook();
        }
    }

    /// Drops all values, keeping capacity. Does nothing (and does not
    /// notify) when already empty.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.mark_changed();
    }

    // ==================== Appending ====================

    pub fn push(&mut self, value: ArgValue<'a>) -> &mut Self {
        self.items.push(value);
        self.mark_changed();
        self
    }

    pub fn push_bool(&mut self, value: bool) -> &mut Self {
        self.push(ArgValue::Bool(value))
    }

    pub fn push_char(&mut self, ch: char) -> &mut Self {
        self.push(ArgValue::Char(ch))
    }

    pub fn push_char_repeat(&mut self, ch: char, count: u16) -> &mut Self {
        self.push(ArgValue::CharRepeat { ch, count })
    }

    pub fn push_str(&mut self, value: &'a str) -> &mut Self {
        self.push(ArgValue::Str(value))
    }

    /// Appends a byte range of `source`. The range must lie inside `source`
    /// and land on character boundaries.
    pub fn push_str_range(
        &mut self,
        source: &'a str,
        start: usize,
        len: usize,
    ) -> Result<&mut Self> {
        Ok(self.push(str_range(source, start, len)?))
    }

    pub fn push_int(&mut self, value: i64) -> &mut Self {
        self.push(ArgValue::Int { value, base: 10 })
    }

    pub fn push_int_base(&mut self, value: i64, base: u32) -> Result<&mut Self> {
        num::ensure_base(base)?;
        Ok(self.push(ArgValue::Int { value, base }))
    }

    pub fn push_float(&mut self, value: f64, decimals: Decimals) -> &mut Self {
        self.push(ArgValue::Float { value, decimals })
    }

    pub fn push_timer(&mut self, seconds: i64, style: TimerStyle) -> &mut Self {
        self.push(ArgValue::Timer { seconds, style })
    }

    pub fn push_display(&mut self, value: &'a dyn fmt::Display) -> &mut Self {
        self.push(ArgValue::Display(value))
    }

    // ==================== In-place setters ====================

    /// Replaces the value at `index`, returning whether kind or payload
    /// actually differ from what was stored.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds; growing the list is `push`'s
    /// job.
    pub fn set(&mut self, index: usize, value: ArgValue<'a>) -> bool {
        let slot = &mut self.items[index];
        if *slot == value {
            return false;
        }
        *slot = value;
        self.mark_changed();
        true
    }

    pub fn set_bool(&mut self, index: usize, value: bool) -> bool {
        self.set(index, ArgValue::Bool(value))
    }

    pub fn set_char(&mut self, index: usize, ch: char) -> bool {
        self.set(index, ArgValue::Char(ch))
    }

    pub fn set_char_repeat(&mut self, index: usize, ch: char, count: u16) -> bool {
        self.set(index, ArgValue::CharRepeat { ch, count })
    }

    pub fn set_str(&mut self, index: usize, value: &'a str) -> bool {
        self.set(index, ArgValue::Str(value))
    }

    pub fn set_str_range(
        &mut self,
        index: usize,
        source: &'a str,
        start: usize,
        len: usize,
    ) -> Result<bool> {
        Ok(self.set(index, str_range(source, start, len)?))
    }

    pub fn set_int(&mut self, index: usize, value: i64) -> bool {
        self.set(index, ArgValue::Int { value, base: 10 })
    }

    pub fn set_int_base(&mut self, index: usize, value: i64, base: u32) -> Result<bool> {
        num::ensure_base(base)?;
        Ok(self.set(index, ArgValue::Int { value, base }))
    }

    pub fn set_float(&mut self, index: usize, value: f64, decimals: Decimals) -> bool {
        self.set(index, ArgValue::Float { value, decimals })
    }

    pub fn set_timer(&mut self, index: usize, seconds: i64, style: TimerStyle) -> bool {
        self.set(index, ArgValue::Timer { seconds, style })
    }

    pub fn set_display(&mut self, index: usize, value: &'a dyn fmt::Display) -> bool {
        self.set(index, ArgValue::Display(value))
    }

    /// Materializes every argument's rendered text.
    pub fn to_strings(&self) -> Vec<String> {
        self.items.iter().map(ArgValue::to_text).collect()
    }
}

fn str_range<'a>(source: &'a str, start: usize, len: usize) -> Result<ArgValue<'a>> {
    match start.checked_add(len) {
        Some(end)
            if end <= source.len()
                && source.is_char_boundary(start)
                && source.is_char_boundary(end) =>
        {
            Ok(ArgValue::StrRange { source, start, len })
        }
        _ => Err(FormatError::OutOfRange {
            start,
            len,
            bounds: source.len(),
        }),
    }
}

impl<'a> Index<usize> for ArgList<'a> {
    type Output = ArgValue<'a>;

    fn index(&self, index: usize) -> &ArgValue<'a> {
        &self.items[index]
    }
}

impl Default for ArgList<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a str> for ArgList<'a> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = ArgList::new();
        for s in iter {
            list.push_str(s);
        }
        list
    }
}

impl<'a> From<&'a [&'a str]> for ArgList<'a> {
    fn from(items: &'a [&'a str]) -> Self {
        items.iter().copied().collect()
    }
}

impl fmt::Debug for ArgList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgList")
            .field("items", &self.items)
            .field("changed", &self.changed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn push_chain_builds_in_order() {
        let mut args = ArgList::new();
        args.push_str("a").push_int(7).push_bool(false);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0].to_text(), "a");
        assert_eq!(args[1].to_text(), "7");
        assert_eq!(args[2].to_text(), "false");
    }

    #[test]
    fn set_reports_actual_change() {
        let mut args = ArgList::new();
        args.push_int(5);
        assert!(!args.set_int(0, 5));
        assert!(args.set_int(0, 6));
        // Same payload, different kind.
        assert!(args.set_str(0, "6"));
        assert!(!args.set_str(0, "6"));
    }

    #[test]
    #[should_panic]
    fn set_out_of_bounds_panics() {
        let mut args = ArgList::new();
        args.push_int(1);
        args.set_int(3, 0);
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let args = ArgList::new();
        let _ = &args[0];
    }

    #[test]
    fn str_range_validation() {
        let mut args = ArgList::new();
        assert!(args.push_str_range("abcdef", 2, 3).is_ok());
        assert_eq!(args[0].to_text(), "cde");

        assert!(matches!(
            args.push_str_range("abc", 2, 5),
            Err(FormatError::OutOfRange { start: 2, len: 5, bounds: 3 })
        ));
        // Splitting a multi-byte character is rejected too.
        assert!(args.push_str_range("héllo", 1, 1).is_err());
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn int_base_validation() {
        let mut args = ArgList::new();
        assert!(args.push_int_base(255, 16).is_ok());
        assert!(matches!(
            args.push_int_base(255, 37),
            Err(FormatError::UnsupportedBase(37))
        ));
        assert!(matches!(
            args.set_int_base(0, 255, 1),
            Err(FormatError::UnsupportedBase(1))
        ));
    }

    #[test]
    fn clear_keeps_capacity_and_is_silent_when_empty() {
        let fired = Cell::new(0);
        let mut args = ArgList::with_notify(|| fired.set(fired.get() + 1));
        args.clear();
        assert_eq!(fired.get(), 0);

        args.push_int(1);
        assert_eq!(fired.get(), 1);

        args.reset_changed();
        args.clear();
        assert_eq!(fired.get(), 2);
        assert!(args.is_empty());
    }

    #[test]
    fn notification_fires_once_per_batch() {
        let fired = Cell::new(0);
        let mut args = ArgList::with_notify(|| fired.set(fired.get() + 1));

        args.push_str("a").push_str("b").push_str("c");
        assert_eq!(fired.get(), 1);
        assert!(args.has_changed());

        args.reset_changed();
        assert!(!args.has_changed());
        assert!(args.set_str(0, "z"));
        assert!(args.set_str(1, "y"));
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn unchanged_set_does_not_arm_the_latch() {
        let fired = Cell::new(0);
        let mut args = ArgList::with_notify(|| fired.set(fired.get() + 1));
        args.push_bool(true);
        args.reset_changed();

        assert!(!args.set_bool(0, true));
        assert_eq!(fired.get(), 1);
        assert!(!args.has_changed());
    }

    #[test]
    fn from_iterator_of_strs() {
        let args: ArgList = ["x", "y"].into_iter().collect();
        assert_eq!(args.to_strings(), vec!["x", "y"]);

        let slice: &[&str] = &["p", "q", "r"];
        let args = ArgList::from(slice);
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn to_strings_renders_every_kind() {
        let mut args = ArgList::new();
        args.push_bool(true)
            .push_char_repeat('=', 3)
            .push_int_base(-255, 16)
            .unwrap()
            .push_float(2.5, Decimals::MaxNonZero(4))
            .push_timer(3723, TimerStyle::Auto);
        assert_eq!(
            args.to_strings(),
            vec!["true", "===", "-ff", "2.5", "1:02:03"]
        );
    }
}
