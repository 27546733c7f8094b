//! Number kinds accepted on the `/numbers/{kind}` route

use std::{fmt, str::FromStr};

use crate::errors::CalculatorError;

/// How a kind's provider is called
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// POST the current window, receive related numbers back
    Derived,
    /// GET with no input
    Unconditional,
}

/// One of the four recognized number sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Primes,
    Fibonacci,
    Even,
    Random,
}

impl NumberKind {
    /// All kinds in route order
    pub const ALL: [Self; 4] = [Self::Primes, Self::Fibonacci, Self::Even, Self::Random];

    /// Route label for this kind
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primes => "primes",
            Self::Fibonacci => "fibo",
            Self::Even => "even",
            Self::Random => "rand",
        }
    }

    #[must_use]
    pub const fn strategy(self) -> FetchStrategy {
        match self {
            Self::Primes | Self::Fibonacci | Self::Even => FetchStrategy::Derived,
            Self::Random => FetchStrategy::Unconditional,
        }
    }
}

impl FromStr for NumberKind {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| CalculatorError::InvalidKind(s.to_string()))
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
