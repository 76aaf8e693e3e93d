use std::env;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub validate_config: bool,
    pub show_version: bool,
    pub show_help: bool,
    pub pretty: bool,
    pub vendor: Option<String>,
    pub files: Vec<String>,
}

impl CliArgs {
    pub fn parse() -> Result<Self, String> {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--validate-config" => parsed.validate_config = true,
                "--version" | "-V" => parsed.show_version = true,
                "--help" | "-h" => parsed.show_help = true,
                "--pretty" => parsed.pretty = true,
                "--vendor" => match args.next() {
                    Some(v) => parsed.vendor = Some(v),
                    None => return Err("--vendor requires a value".to_string()),
                },
                "-" => parsed.files.push(arg),
                other if other.starts_with('-') => {
                    return Err(format!("unknown option: {}", other));
                }
                _ => parsed.files.push(arg),
            }
        }

        Ok(parsed)
    }

    pub fn print_help() {
        println!("bmc-cert-metrics {}", VERSION);
        println!();
        println!("Normalize BMC SSL certificate documents (Dell iDRAC, HPE iLO, Cisco CIMC,");
        println!("SuperMicro) into one canonical JSON record per certificate");
        println!();
        println!("USAGE:");
        println!("    bmc-cert-metrics [OPTIONS] [FILE...]");
        println!();
        println!("    Reads stdin when no FILE (or `-`) is given. Each input is one");
        println!("    Redfish certificate document; one record is printed per line.");
        println!();
        println!("OPTIONS:");
        println!("    --vendor <NAME>      Force vendor: auto, dell, hpe, cisco, supermicro, unknown");
        println!("    --pretty             Pretty-print records");
        println!("    --validate-config    Validate configuration and exit");
        println!("    -V, --version        Print version information");
        println!("    -h, --help           Print help information");
        println!();
        println!("ENVIRONMENT VARIABLES:");
        println!("    BMC_CERTS_CONFIG         Path to config file");
        println!("    BMC_CERTS_LOG_LEVEL      Log level (default: info)");
        println!("    BMC_CERTS_VENDOR         Vendor (default: auto)");
        println!("    BMC_CERTS_WARN_DAYS      Warn when a certificate expires within N days (default: 30)");
        println!("    BMC_CERTS_PRETTY         Pretty-print records (default: false)");
    }

    pub fn print_version() {
        println!("bmc-cert-metrics {}", VERSION);
    }
}
