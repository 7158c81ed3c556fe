use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::MetricsError;

/// An inclusive date range inside a month, usually one "week" of the goals
/// table. Users may edit these, so a set of windows is not guaranteed to tile
/// the month; see [`check_coverage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn new(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered (0 for an inverted window).
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(0)
    }
}

pub fn first_day_of_month(year: i32, month: u32) -> Result<NaiveDate, MetricsError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(MetricsError::InvalidPeriod { year, month })
}

pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate, MetricsError> {
    first_day_of_month(year, month)?;
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .ok_or(MetricsError::InvalidPeriod { year, month })
}

/// Default split of a month: days 1-7, 8-14, 15-21 and 22 to the end.
pub fn default_weeks(year: i32, month: u32) -> Result<Vec<WeekWindow>, MetricsError> {
    let first = first_day_of_month(year, month)?;
    let last = last_day_of_month(year, month)?;

    let mut weeks = Vec::with_capacity(4);
    let mut start = first;
    for n in 1..=4 {
        let end = if n == 4 {
            last
        } else {
            start + Duration::days(6)
        };
        weeks.push(WeekWindow::new(format!("Semana {}", n), start, end));
        start = end + Duration::days(1);
    }
    Ok(weeks)
}

/// A problem found in a set of week windows. Reported, never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoverageIssue {
    /// Days of the month that no window covers.
    Gap { from: NaiveDate, to: NaiveDate },
    Overlap { first: String, second: String },
    OutsideMonth { label: String },
    Inverted { label: String },
}

/// Check whether `windows` tile the month with no gaps and no overlaps.
pub fn check_coverage(
    windows: &[WeekWindow],
    year: i32,
    month: u32,
) -> Result<Vec<CoverageIssue>, MetricsError> {
    let first = first_day_of_month(year, month)?;
    let last = last_day_of_month(year, month)?;
    let mut issues = Vec::new();

    let mut valid: Vec<&WeekWindow> = Vec::with_capacity(windows.len());
    for w in windows {
        if w.start > w.end {
            issues.push(CoverageIssue::Inverted {
                label: w.label.clone(),
            });
            continue;
        }
        if w.start < first || w.end > last {
            issues.push(CoverageIssue::OutsideMonth {
                label: w.label.clone(),
            });
        }
        valid.push(w);
    }
    valid.sort_by_key(|w| (w.start, w.end));

    // Next day not yet covered by any window seen so far.
    let mut cursor = first;
    // Windows whose end has not been passed yet, in start order.
    let mut open: Vec<&WeekWindow> = Vec::new();
    for w in valid {
        open.retain(|p| p.end >= w.start);
        for p in &open {
            issues.push(CoverageIssue::Overlap {
                first: p.label.clone(),
                second: w.label.clone(),
            });
        }
        if w.start > cursor && cursor <= last {
            let to = (w.start - Duration::days(1)).min(last);
            issues.push(CoverageIssue::Gap { from: cursor, to });
        }
        if w.end >= cursor {
            cursor = w.end + Duration::days(1);
        }
        open.push(w);
    }
    if cursor <= last {
        issues.push(CoverageIssue::Gap {
            from: cursor,
            to: last,
        });
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_default_weeks_tile_the_month() {
        let weeks = default_weeks(2024, 2).unwrap();
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].start, d(2024, 2, 1));
        assert_eq!(weeks[0].end, d(2024, 2, 7));
        assert_eq!(weeks[2].end, d(2024, 2, 21));
        assert_eq!(weeks[3].start, d(2024, 2, 22));
        assert_eq!(weeks[3].end, d(2024, 2, 29));
        assert_eq!(weeks[3].label, "Semana 4");
        assert!(check_coverage(&weeks, 2024, 2).unwrap().is_empty());

        let dec = default_weeks(2025, 12).unwrap();
        assert_eq!(dec[3].end, d(2025, 12, 31));
        assert_eq!(dec.iter().map(|w| w.days()).sum::<i64>(), 31);
    }

    #[test]
    fn test_invalid_month() {
        assert_eq!(
            default_weeks(2025, 13),
            Err(MetricsError::InvalidPeriod {
                year: 2025,
                month: 13
            })
        );
    }

    #[test]
    fn test_gap_and_overlap_are_reported() {
        let weeks = vec![
            WeekWindow::new("A", d(2025, 3, 1), d(2025, 3, 10)),
            WeekWindow::new("B", d(2025, 3, 8), d(2025, 3, 15)),
            WeekWindow::new("C", d(2025, 3, 20), d(2025, 3, 31)),
        ];
        let issues = check_coverage(&weeks, 2025, 3).unwrap();
        assert_eq!(
            issues,
            vec![
                CoverageIssue::Overlap {
                    first: "A".into(),
                    second: "B".into()
                },
                CoverageIssue::Gap {
                    from: d(2025, 3, 16),
                    to: d(2025, 3, 19)
                },
            ]
        );
    }

    #[test]
    fn test_trailing_gap_inverted_and_outside() {
        let weeks = vec![
            WeekWindow::new("A", d(2025, 4, 1), d(2025, 4, 20)),
            WeekWindow::new("X", d(2025, 4, 25), d(2025, 4, 22)),
            WeekWindow::new("B", d(2025, 4, 21), d(2025, 5, 2)),
        ];
        let issues = check_coverage(&weeks, 2025, 4).unwrap();
        assert!(issues.contains(&CoverageIssue::Inverted { label: "X".into() }));
        assert!(issues.contains(&CoverageIssue::OutsideMonth { label: "B".into() }));
        assert!(!issues
            .iter()
            .any(|i| matches!(i, CoverageIssue::Gap { .. })));

        let short = vec![WeekWindow::new("A", d(2025, 4, 1), d(2025, 4, 28))];
        assert_eq!(
            check_coverage(&short, 2025, 4).unwrap(),
            vec![CoverageIssue::Gap {
                from: d(2025, 4, 29),
                to: d(2025, 4, 30)
            }]
        );
    }

    #[test]
    fn test_every_overlapping_pair_is_reported() {
        let weeks = vec![
            WeekWindow::new("A", d(2025, 3, 1), d(2025, 3, 31)),
            WeekWindow::new("B", d(2025, 3, 5), d(2025, 3, 10)),
            WeekWindow::new("C", d(2025, 3, 8), d(2025, 3, 15)),
            WeekWindow::new("D", d(2025, 3, 20), d(2025, 3, 25)),
        ];
        let overlap = |a: &str, b: &str| CoverageIssue::Overlap {
            first: a.into(),
            second: b.into(),
        };
        assert_eq!(
            check_coverage(&weeks, 2025, 3).unwrap(),
            vec![
                overlap("A", "B"),
                overlap("A", "C"),
                overlap("B", "C"),
                overlap("A", "D"),
            ]
        );
    }

    #[test]
    fn test_windows_entirely_outside_the_month() {
        let weeks = vec![
            WeekWindow::new("A", d(2025, 3, 1), d(2025, 3, 15)),
            WeekWindow::new("Y", d(2025, 2, 1), d(2025, 2, 7)),
            WeekWindow::new("Z", d(2025, 4, 1), d(2025, 4, 7)),
        ];
        assert_eq!(
            check_coverage(&weeks, 2025, 3).unwrap(),
            vec![
                CoverageIssue::OutsideMonth { label: "Y".into() },
                CoverageIssue::OutsideMonth { label: "Z".into() },
                CoverageIssue::Gap {
                    from: d(2025, 3, 16),
                    to: d(2025, 3, 31)
                },
            ]
        );
    }

    #[test]
    fn test_window_helpers() {
        let w = WeekWindow::new("S", d(2025, 1, 8), d(2025, 1, 14));
        assert_eq!(w.days(), 7);
        assert!(w.contains(d(2025, 1, 8)));
        assert!(!w.contains(d(2025, 1, 15)));
    }
}
