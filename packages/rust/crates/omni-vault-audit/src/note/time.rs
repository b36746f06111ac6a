use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_yaml::Value;

fn date_to_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(num) => num
            .as_i64()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            if let Ok(epoch) = trimmed.parse::<i64>() {
                return Utc.timestamp_opt(epoch, 0).single();
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            {
                return Some(Utc.from_utc_datetime(&naive));
            }
            ["%Y-%m-%d", "%Y/%m/%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
                .and_then(date_to_utc)
        }
        _ => None,
    }
}

fn extract_frontmatter_timestamp(
    frontmatter: Option<&Value>,
    keys: &[&str],
) -> Option<DateTime<Utc>> {
    let value = frontmatter?;
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(parse_timestamp_value)
}

/// Resolve `(created, modified)` from frontmatter keys, falling back to stats.
pub(crate) fn resolve_note_timestamps(
    frontmatter: Option<&Value>,
    stat_created: Option<DateTime<Utc>>,
    stat_modified: DateTime<Utc>,
    prefer_frontmatter: bool,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let fs_created = stat_created.unwrap_or(stat_modified);
    if !prefer_frontmatter {
        return (fs_created, stat_modified);
    }
    let created = extract_frontmatter_timestamp(frontmatter, &["created", "created_at", "date"]);
    let modified = extract_frontmatter_timestamp(
        frontmatter,
        &["modified", "modified_at", "updated", "updated_at"],
    );
    (
        created.unwrap_or(fs_created),
        modified.unwrap_or(stat_modified),
    )
}
