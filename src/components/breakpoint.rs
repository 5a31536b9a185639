use std::{fmt, str::FromStr};

/// Named viewport widths, smallest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    Base,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 6] = [
        Breakpoint::Base,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
        Breakpoint::Xxl,
    ];

    /// Minimum viewport width in pixels.
    #[must_use]
    pub const fn min_width(self) -> u32 {
        match self {
            Breakpoint::Base => 0,
            Breakpoint::Sm => 480,
            Breakpoint::Md => 768,
            Breakpoint::Lg => 992,
            Breakpoint::Xl => 1280,
            Breakpoint::Xxl => 1536,
        }
    }

    /// Largest breakpoint whose minimum width fits the viewport.
    #[must_use]
    pub fn from_width(width: u32) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Base)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Breakpoint::Base => "base",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
            Breakpoint::Xxl => "2xl",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bp| bp.as_str() == value.trim().to_lowercase())
            .ok_or_else(|| format!("unknown breakpoint: {value}"))
    }
}

/// Responsive value map: each entry applies from its breakpoint upwards
/// until a larger defined breakpoint takes over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakpointValues<T> {
    values: Vec<(Breakpoint, T)>,
}

impl<T> Default for BreakpointValues<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T> BreakpointValues<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, breakpoint: Breakpoint, value: T) -> Self {
        self.values.retain(|(bp, _)| *bp != breakpoint);
        self.values.push((breakpoint, value));
        self.values.sort_by_key(|(bp, _)| *bp);
        self
    }

    /// Value for a viewport width, or `None` when no defined breakpoint fits.
    #[must_use]
    pub fn resolve(&self, width: u32) -> Option<&T> {
        let current = Breakpoint::from_width(width);
        self.values
            .iter()
            .rev()
            .find(|(bp, _)| *bp <= current)
            .map(|(_, value)| value)
    }
}
