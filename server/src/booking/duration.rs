//! Duration labels
//!
//! Price rows and booking payloads carry human-readable duration labels
//! ("30 mins", "1 hour", "2 hours 30 mins"). Sessions run on a 30-minute
//! grid, so every label must land on it.

/// Smallest bookable increment.
pub const STEP_MINUTES: i64 = 30;

/// Parse a duration label into minutes.
///
/// Accepts "N mins", "N hours" and "N hours M mins" shapes (singular
/// units too). Returns `None` for anything unparseable, non-positive or
/// off the 30-minute grid.
pub fn label_to_minutes(label: &str) -> Option<i64> {
    let mut hours: Option<i64> = None;
    let mut minutes: Option<i64> = None;

    let mut tokens = label.split_whitespace();
    while let Some(number) = tokens.next() {
        let n: i64 = number.parse().ok()?;
        let unit = tokens.next()?;
        match unit.to_ascii_lowercase().as_str() {
            "min" | "mins" => {
                if minutes.replace(n).is_some() {
                    return None;
                }
            }
            "hour" | "hours" => {
                if hours.replace(n).is_some() {
                    return None;
                }
            }
            _ => return None,
        }
    }
    if hours.is_none() && minutes.is_none() {
        return None;
    }

    let total = hours.unwrap_or(0) * 60 + minutes.unwrap_or(0);
    if total <= 0 || total % STEP_MINUTES != 0 {
        return None;
    }
    Some(total)
}

/// Render minutes back into the canonical label shape.
pub fn minutes_to_label(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m} mins"),
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{h} hours"),
        (1, m) => format!("1 hour {m} mins"),
        (h, m) => format!("{h} hours {m} mins"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_labels() {
        assert_eq!(label_to_minutes("30 mins"), Some(30));
        assert_eq!(label_to_minutes("1 hour"), Some(60));
        assert_eq!(label_to_minutes("2 hours"), Some(120));
        assert_eq!(label_to_minutes("1 hour 30 mins"), Some(90));
        assert_eq!(label_to_minutes("2 hours 30 mins"), Some(150));
    }

    #[test]
    fn parsing_is_lenient_on_case_and_singulars() {
        assert_eq!(label_to_minutes("1 Hour"), Some(60));
        assert_eq!(label_to_minutes("30 min"), Some(30));
        assert_eq!(label_to_minutes("  1 hour   30 mins "), Some(90));
    }

    #[test]
    fn rejects_off_grid_and_garbage() {
        assert_eq!(label_to_minutes("45 mins"), None);
        assert_eq!(label_to_minutes("0 mins"), None);
        assert_eq!(label_to_minutes("-30 mins"), None);
        assert_eq!(label_to_minutes("fast"), None);
        assert_eq!(label_to_minutes(""), None);
        assert_eq!(label_to_minutes("1 hour 30"), None);
        assert_eq!(label_to_minutes("30 mins 30 mins"), None);
        assert_eq!(label_to_minutes("1 fortnight"), None);
    }

    #[test]
    fn labels_round_trip() {
        for minutes in [30, 60, 90, 120, 150, 180, 240] {
            let label = minutes_to_label(minutes);
            assert_eq!(label_to_minutes(&label), Some(minutes), "label {label:?}");
        }
    }

    #[test]
    fn label_shapes() {
        assert_eq!(minutes_to_label(30), "30 mins");
        assert_eq!(minutes_to_label(60), "1 hour");
        assert_eq!(minutes_to_label(90), "1 hour 30 mins");
        assert_eq!(minutes_to_label(120), "2 hours");
        assert_eq!(minutes_to_label(150), "2 hours 30 mins");
    }
}
