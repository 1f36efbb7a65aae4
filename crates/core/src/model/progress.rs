use std::fmt;

/// Completion ratio of a group of checkboxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    checked: usize,
    total: usize,
}

impl Progress {
    /// Build a ratio. `checked` is clamped to `total`.
    #[must_use]
    pub fn new(checked: usize, total: usize) -> Self {
        Self {
            checked: checked.min(total),
            total,
        }
    }

    /// Tally a sequence of checked flags.
    pub fn tally<I: IntoIterator<Item = bool>>(flags: I) -> Self {
        let (checked, total) = flags
            .into_iter()
            .fold((0, 0), |(checked, total), on| (checked + usize::from(on), total + 1));
        Self { checked, total }
    }

    #[must_use]
    pub fn checked(&self) -> usize {
        self.checked
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whole percentage, halves rounded up. An empty group is 0%.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        percentage(self.checked, self.total)
    }

    /// Count label in the form `checked / total`.
    #[must_use]
    pub fn count_label(&self) -> String {
        format!("{} / {}", self.checked, self.total)
    }

    /// Percentage label in the form `N%`.
    #[must_use]
    pub fn percent_label(&self) -> String {
        format!("{}%", self.percentage())
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.count_label(), self.percentage())
    }
}

/// `round(checked / total * 100)` with halves rounded up, computed in integers.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn percentage(checked: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let checked = checked.min(total) as u128;
    let total = total as u128;
    // floor(100c/t + 1/2) == floor((200c + t) / 2t)
    let pct = (200 * checked + total) / (2 * total);
    u8::try_from(pct).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_of_three_rounds_up() {
        let progress = Progress::new(2, 3);
        assert_eq!(progress.percentage(), 67);
        assert_eq!(progress.count_label(), "2 / 3");
    }

    #[test]
    fn one_of_three_rounds_down() {
        assert_eq!(Progress::new(1, 3).percentage(), 33);
    }

    #[test]
    fn exact_half_rounds_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(3, 8), 38);
    }

    #[test]
    fn empty_group_is_zero_percent() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(Progress::default().percent_label(), "0%");
    }

    #[test]
    fn bounds() {
        assert_eq!(percentage(0, 4), 0);
        assert_eq!(percentage(4, 4), 100);
        assert_eq!(Progress::new(9, 4).checked(), 4);
    }

    #[test]
    fn tally_counts_flags() {
        let progress = Progress::tally([true, false, true, false, false, false]);
        assert_eq!(progress, Progress::new(2, 6));
        assert_eq!(progress.percentage(), 33);
        assert_eq!(progress.to_string(), "2 / 6 (33%)");
    }
}
