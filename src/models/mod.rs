mod metrics;
mod vendor;

pub use metrics::CanonicalCertMetrics;
pub use vendor::*;
