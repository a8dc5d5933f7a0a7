/// Region code used when nothing in the location text is recognised.
pub const DEFAULT_REGION: &str = "US";

/// Ordered (substring, region) table. The first key found anywhere in the
/// normalised location wins, so order is significant.
const REGION_TABLE: &[(&str, &str)] = &[
    ("bangalore", "IN"),
    ("india", "IN"),
    ("delhi", "IN"),
    ("mumbai", "IN"),
    ("hyderabad", "IN"),
    ("chennai", "IN"),
    ("kolkata", "IN"),
    ("usa", "US"),
    ("united states", "US"),
    ("new york", "US"),
    ("seattle", "US"),
    ("san francisco", "US"),
    ("london", "GB"),
    ("uk", "GB"),
    ("united kingdom", "GB"),
    ("canada", "CA"),
    ("australia", "AU"),
    ("germany", "DE"),
    ("france", "FR"),
    ("japan", "JP"),
    ("singapore", "SG"),
    ("remote", "US"),
];

/// Maps free-text location to a 2-letter region code by substring match.
pub fn infer_region(location: &str) -> &'static str {
    let normalized = location.trim().to_lowercase();

    REGION_TABLE
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|(_, region)| *region)
        .unwrap_or(DEFAULT_REGION)
}
