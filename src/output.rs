use std::io::{self, Write};

use crate::models::CanonicalCertMetrics;

/// Write one record: a single JSON line, or indented JSON when `pretty`.
pub fn write_record<W: Write>(
    out: &mut W,
    metrics: &CanonicalCertMetrics,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, metrics)?;
    } else {
        serde_json::to_writer(&mut *out, metrics)?;
    }
    out.write_all(b"\n")
}
