/// Rolling window used to filter and aggregate statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum StatisticsPeriod {
    #[default]
    LastMonth,
    LastSixMonths,
    LastYear,
}

impl StatisticsPeriod {
    pub(crate) fn all() -> &'static [StatisticsPeriod] {
        &[Self::LastMonth, Self::LastSixMonths, Self::LastYear]
    }

    /// Number of calendar months the window (and the chart) spans.
    pub(crate) fn months(&self) -> u32 {
        match self {
            Self::LastMonth => 1,
            Self::LastSixMonths => 6,
            Self::LastYear => 12,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::LastMonth => "1m",
            Self::LastSixMonths => "6m",
            Self::LastYear => "1y",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1m" | "1" | "month" | "last-month" => Some(Self::LastMonth),
            "6m" | "6" | "6months" | "half-year" => Some(Self::LastSixMonths),
            "1y" | "12m" | "12" | "year" | "last-year" => Some(Self::LastYear),
            _ => None,
        }
    }

    pub(crate) fn next(&self) -> Self {
        match self {
            Self::LastMonth => Self::LastSixMonths,
            Self::LastSixMonths => Self::LastYear,
            Self::LastYear => Self::LastMonth,
        }
    }

    pub(crate) fn prev(&self) -> Self {
        match self {
            Self::LastMonth => Self::LastYear,
            Self::LastSixMonths => Self::LastMonth,
            Self::LastYear => Self::LastSixMonths,
        }
    }
}

impl std::fmt::Display for StatisticsPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastMonth => write!(f, "1 Month"),
            Self::LastSixMonths => write!(f, "6 Months"),
            Self::LastYear => write!(f, "1 Year"),
        }
    }
}
