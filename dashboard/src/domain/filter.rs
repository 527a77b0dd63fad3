//! Single-attribute filters applied to dashboard collections.

/// Select labels a UI uses to mean "no filter".
pub const NO_FILTER_LABELS: [&str; 2] = ["All", "All Categories"];

/// Equality predicate over one discriminator attribute, or no filter.
///
/// # Examples
/// ```
/// use dashboard::domain::{FilterSpec, ServiceStatus};
///
/// let filter = FilterSpec::parse("active", str::parse::<ServiceStatus>).expect("known status");
/// assert_eq!(filter, FilterSpec::Equals(ServiceStatus::Active));
///
/// let all = FilterSpec::parse("All", str::parse::<ServiceStatus>).expect("sentinel");
/// assert!(all.matches(&ServiceStatus::Inactive));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec<D> {
    /// Keep every record.
    All,
    /// Keep records whose discriminator equals the value.
    Equals(D),
}

impl<D> Default for FilterSpec<D> {
    fn default() -> Self {
        Self::All
    }
}

impl<D: PartialEq> FilterSpec<D> {
    /// Whether a discriminator value passes the filter.
    pub fn matches(&self, value: &D) -> bool {
        match self {
            Self::All => true,
            Self::Equals(expected) => expected == value,
        }
    }
}

impl<D> FilterSpec<D> {
    /// Parse a UI filter label.
    ///
    /// The "no filter" labels are recognised case-insensitively; anything else
    /// is handed to `parse_value`.
    pub fn parse<E>(
        raw: &str,
        parse_value: impl FnOnce(&str) -> Result<D, E>,
    ) -> Result<Self, E> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || NO_FILTER_LABELS
                .iter()
                .any(|label| label.eq_ignore_ascii_case(trimmed))
        {
            return Ok(Self::All);
        }
        parse_value(trimmed).map(Self::Equals)
    }
}
