/*!
 * In-memory model of a Praat TextGrid.
 *
 * A TextGrid is an ordered list of tiers. Each tier is either an interval
 * tier (labelled spans) or a point tier (labelled instants, called
 * `TextTier` inside the file format).
 */

/// Labelled span on an interval tier
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Interval text
    pub label: String,
}

impl Interval {
    pub fn new(start: f64, end: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// Labelled instant on a point tier
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Time in seconds
    pub time: f64,
    /// Point mark
    pub label: String,
}

impl Point {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTier {
    pub name: String,
    pub min_time: f64,
    pub max_time: f64,
    pub entries: Vec<Interval>,
}

impl IntervalTier {
    pub fn new(name: impl Into<String>, min_time: f64, max_time: f64, entries: Vec<Interval>) -> Self {
        Self {
            name: name.into(),
            min_time,
            max_time,
            entries,
        }
    }

    /// Entries with the gaps between `min_time`, each interval and `max_time`
    /// filled by empty-label intervals.
    pub fn with_blank_spaces(&self) -> Vec<Interval> {
        let mut filled = Vec::with_capacity(self.entries.len() * 2 + 1);
        let mut cursor = self.min_time;

        for entry in &self.entries {
            if entry.start > cursor {
                filled.push(Interval::new(cursor, entry.start, ""));
            }
            filled.push(entry.clone());
            cursor = cursor.max(entry.end);
        }

        if self.max_time > cursor {
            filled.push(Interval::new(cursor, self.max_time, ""));
        }

        filled
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointTier {
    pub name: String,
    pub min_time: f64,
    pub max_time: f64,
    pub entries: Vec<Point>,
}

impl PointTier {
    pub fn new(name: impl Into<String>, min_time: f64, max_time: f64, entries: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            min_time,
            max_time,
            entries,
        }
    }
}

/// A single tier of either kind
#[derive(Debug, Clone, PartialEq)]
pub enum Tier {
    Interval(IntervalTier),
    Point(PointTier),
}

impl Tier {
    pub fn name(&self) -> &str {
        match self {
            Tier::Interval(tier) => &tier.name,
            Tier::Point(tier) => &tier.name,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            Tier::Interval(tier) => tier.name = name,
            Tier::Point(tier) => tier.name = name,
        }
    }

    pub fn min_time(&self) -> f64 {
        match self {
            Tier::Interval(tier) => tier.min_time,
            Tier::Point(tier) => tier.min_time,
        }
    }

    pub fn max_time(&self) -> f64 {
        match self {
            Tier::Interval(tier) => tier.max_time,
            Tier::Point(tier) => tier.max_time,
        }
    }

    /// Class name used in the file format
    pub fn class_name(&self) -> &'static str {
        match self {
            Tier::Interval(_) => "IntervalTier",
            Tier::Point(_) => "TextTier",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Tier::Interval(tier) => tier.entries.len(),
            Tier::Point(tier) => tier.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ordered collection of tiers sharing a time domain
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextGrid {
    pub xmin: f64,
    pub xmax: f64,
    pub tiers: Vec<Tier>,
}

impl TextGrid {
    /// Create an empty TextGrid spanning the given domain
    pub fn new(xmin: f64, xmax: f64) -> Self {
        Self {
            xmin,
            xmax,
            tiers: Vec::new(),
        }
    }

    /// Append a tier, widening the domain if the tier extends past it
    pub fn add_tier(&mut self, tier: Tier) {
        if self.tiers.is_empty() {
            self.xmin = tier.min_time();
            self.xmax = tier.max_time();
        } else {
            self.xmin = self.xmin.min(tier.min_time());
            self.xmax = self.xmax.max(tier.max_time());
        }
        self.tiers.push(tier);
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }
}
