//! Normalizes the SSL certificate documents that Redfish BMCs (Dell iDRAC,
//! HPE iLO, Cisco CIMC, SuperMicro) publish into one vendor-neutral record.

pub mod cli;
pub mod config;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod output;
