use crate::error::ServiceError;

/// The canonical team codes served by the origin site.
pub const TEAM_CODES: [&str; 30] = [
    "ARI", "ATL", "BAL", "BOS", "CHC", "CIN", "CLE", "COL", "CWS", "DET", "HOU", "KC", "LAA",
    "LAD", "MIA", "MIL", "MIN", "NYM", "NYY", "OAK", "PHI", "PIT", "SD", "SEA", "SF", "STL", "TB",
    "TEX", "TOR", "WSH",
];

/// Validate and canonicalize a team code.
///
/// Accepts any casing; returns the upper-case code. Empty or unrecognized
/// codes are rejected with `InvalidArgument`.
pub fn canonical_team_code(code: &str) -> Result<String, ServiceError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidArgument(
            "Team code cannot be empty".to_string(),
        ));
    }

    let upper = trimmed.to_ascii_uppercase();
    if TEAM_CODES.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(ServiceError::InvalidArgument(format!(
            "Unrecognized team code: {trimmed}"
        )))
    }
}
