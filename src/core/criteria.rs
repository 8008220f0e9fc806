/// Parsed form of an eligibility age criterion
///
/// Catalog strings come in two shapes: a range such as "18-40 years" and an
/// open threshold such as "above 60" or "60 years and above".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeCriterion {
    Range { min: u32, max: u32 },
    Above(u32),
}

impl AgeCriterion {
    /// Parse a criterion string; anything unrecognised yields `None`
    pub fn parse(criterion: &str) -> Option<Self> {
        if criterion.contains('-') {
            let mut bounds = criterion.split('-');
            let min = leading_number(bounds.next()?)?;
            let max = leading_number(bounds.next()?)?;
            if bounds.next().is_some() {
                return None;
            }
            return Some(Self::Range { min, max });
        }

        if criterion.to_lowercase().contains("above") {
            let threshold = criterion
                .split_whitespace()
                .find_map(|token| token.parse::<u32>().ok())?;
            return Some(Self::Above(threshold));
        }

        None
    }

    pub fn admits(&self, age: u32) -> bool {
        match *self {
            Self::Range { min, max } => min <= age && age <= max,
            Self::Above(threshold) => age >= threshold,
        }
    }
}

/// First whitespace-separated token of `part`, parsed as a number
fn leading_number(part: &str) -> Option<u32> {
    part.split_whitespace().next()?.parse().ok()
}

/// Whether `age` satisfies the criterion string; malformed criteria never match
#[inline]
pub fn age_matches(criterion: &str, age: u32) -> bool {
    AgeCriterion::parse(criterion).map_or(false, |parsed| parsed.admits(age))
}

/// Case-insensitive substring test
#[inline]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Location overlap: either side contains the other, ignoring case
#[inline]
pub fn locations_overlap(profile_location: &str, scheme_location: &str) -> bool {
    let profile_location = profile_location.to_lowercase();
    let scheme_location = scheme_location.to_lowercase();
    profile_location.contains(&scheme_location) || scheme_location.contains(&profile_location)
}

/// Income text that declares below-poverty-line status
#[inline]
pub fn declares_bpl(income: &str) -> bool {
    let income = income.to_lowercase();
    income.contains("bpl") || income.contains("below poverty")
}
