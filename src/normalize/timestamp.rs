use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("unrecognized timestamp format: {input:?}")]
    Unrecognized { input: String },
}

/// Date-time encodings seen across BMC firmware, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLayout {
    /// `2022-10-27T16:59:33Z`, offsets and fractional seconds allowed.
    Rfc3339,
    /// `2022-10-27T16:59:33` with no zone, read as UTC.
    IsoNaive,
    /// `Oct 18 00:00:00 2018 GMT` as printed by OpenSSL.
    OpenSsl,
}

impl TimestampLayout {
    pub const ORDERED: [TimestampLayout; 3] = [
        TimestampLayout::Rfc3339,
        TimestampLayout::IsoNaive,
        TimestampLayout::OpenSsl,
    ];

    pub fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        match self {
            TimestampLayout::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            TimestampLayout::IsoNaive => {
                NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            }
            TimestampLayout::OpenSsl => {
                // OpenSSL pads single-digit days with a second space
                let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
                let body = collapsed
                    .strip_suffix(" GMT")
                    .or_else(|| collapsed.strip_suffix(" UTC"))?;
                NaiveDateTime::parse_from_str(body, "%b %d %H:%M:%S %Y")
                    .ok()
                    .map(|naive| naive.and_utc())
            }
        }
    }
}

/// Parse a vendor timestamp. Empty input is absent, not a failure.
pub fn parse_timestamp(input: &str) -> Result<Option<DateTime<Utc>>, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    TimestampLayout::ORDERED
        .iter()
        .find_map(|layout| layout.parse(trimmed))
        .map(Some)
        .ok_or_else(|| TimestampError::Unrecognized {
            input: input.to_string(),
        })
}

/// Render an instant in the compact layout used by the canonical record.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
