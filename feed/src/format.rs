//! Small pure formatting helpers shared by the card and drawer renderers.

use chrono::{DateTime, Utc};

/// Formats a millisecond duration for display.
///
/// Durations under a second render as `"850ms"`, under a minute as `"2.3s"`,
/// and longer ones as `"4m 05s"`.
#[must_use]
pub fn duration_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1_000.0)
    } else {
        let total_secs = ms / 1_000;
        format!("{}m {:02}s", total_secs / 60, total_secs % 60)
    }
}

/// Formats a token or event count compactly (`"950"`, `"12.4k"`, `"2.1M"`).
#[must_use]
pub fn compact_count(count: u64) -> String {
    if count < 1_000 {
        count.to_string()
    } else if count < 1_000_000 {
        format!("{:.1}k", count as f64 / 1_000.0)
    } else {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    }
}

/// Renders a timestamp relative to `now` (`"just now"`, `"5m ago"`, ...).
///
/// Timestamps in the future (clock skew in fixture data) render as
/// `"just now"` rather than going negative.
#[must_use]
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Truncates a string to `max_chars`, appending `"..."` when clipped.
///
/// Returns the input unchanged when it already fits. Widths under four
/// characters collapse to the empty string (no room for the ellipsis).
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if max_chars < 4 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let clipped: String = s.chars().take(max_chars - 3).collect();
    format!("{clipped}...")
}

/// Collapses newlines and runs of whitespace into single spaces, for text
/// that must fit a one-line slot.
#[must_use]
pub fn single_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase initials for the identity rail (`"Dana Wei"` -> `"DW"`).
///
/// Falls back to `"?"` for names with no alphanumeric content.
#[must_use]
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect();
    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Short form of a commit hash (first seven characters).
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    let end = sha
        .char_indices()
        .nth(7)
        .map_or(sha.len(), |(idx, _)| idx);
    &sha[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn duration_under_a_second_uses_ms() {
        assert_eq!(duration_ms(850), "850ms");
        assert_eq!(duration_ms(0), "0ms");
    }

    #[test]
    fn duration_under_a_minute_uses_decimal_seconds() {
        assert_eq!(duration_ms(2_300), "2.3s");
        assert_eq!(duration_ms(59_949), "59.9s");
    }

    #[test]
    fn duration_over_a_minute_uses_minutes_and_seconds() {
        assert_eq!(duration_ms(245_000), "4m 05s");
        assert_eq!(duration_ms(60_000), "1m 00s");
    }

    #[test]
    fn compact_count_scales_units() {
        assert_eq!(compact_count(950), "950");
        assert_eq!(compact_count(12_400), "12.4k");
        assert_eq!(compact_count(2_100_000), "2.1M");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(relative_time(now - Duration::seconds(20), now), "just now");
        assert_eq!(relative_time(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(relative_time(now - Duration::hours(3), now), "3h ago");
        assert_eq!(relative_time(now - Duration::days(2), now), "2d ago");
    }

    #[test]
    fn relative_time_future_clamps_to_just_now() {
        let now = Utc::now();
        assert_eq!(relative_time(now + Duration::minutes(10), now), "just now");
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_chars("short", 20), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }

    #[test]
    fn truncate_clips_with_ellipsis() {
        let out = truncate_chars("this is a very long message", 15);
        assert_eq!(out, "this is a ve...");
        assert_eq!(out.chars().count(), 15);
    }

    #[test]
    fn truncate_tiny_width_is_empty() {
        assert_eq!(truncate_chars("anything", 3), "");
    }

    #[test]
    fn single_line_collapses_whitespace() {
        assert_eq!(single_line("a\n  b\t c"), "a b c");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Dana Wei"), "DW");
        assert_eq!(initials("ci-bot"), "C");
        assert_eq!(initials("jordan@northwind.io"), "J");
        assert_eq!(initials("---"), "?");
    }

    #[test]
    fn short_sha_is_seven_chars() {
        assert_eq!(short_sha("4c9f2ab81d6e"), "4c9f2ab");
        assert_eq!(short_sha("abc"), "abc");
    }
}
