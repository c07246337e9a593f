use time::OffsetDateTime;

const MAX_DESCRIPTION_LEN: usize = 100;

/// Builds `clay_<description>_[variation_<n>_]<timestamp>.png`.
///
/// `variation` is zero based, the name carries it one based. Every character of the
/// description that is not ASCII alphanumeric becomes `_`.
pub fn generate_filename(
    description: &str,
    variation: Option<usize>,
    timestamp: OffsetDateTime,
) -> String {
    let variation_part = match variation {
        Some(index) => format!("variation_{}_", index + 1),
        None => String::new(),
    };

    format!(
        "clay_{}_{variation_part}{}.png",
        sanitize(description),
        format_timestamp(timestamp)
    )
}

pub fn sanitize(description: &str) -> String {
    description
        .chars()
        .take(MAX_DESCRIPTION_LEN)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// ISO-8601 in UTC with `:` and `.` replaced, e.g. `2026-10-18T09-15-02-481Z`
pub fn format_timestamp(timestamp: OffsetDateTime) -> String {
    let t = timestamp.to_offset(time::UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}-{:02}-{:02}-{:03}Z",
        t.year(),
        u8::from(t.month()),
        t.day(),
        t.hour(),
        t.minute(),
        t.second(),
        t.millisecond()
    )
}
