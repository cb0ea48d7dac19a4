//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use nfsn_core::config::DEFAULT_DYNDNS_TTL;
use nfsn_ip_http::DEFAULT_IP_SERVICE;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long `dyndns` options also accepted with a single dash (`-domain example.com`)
const SINGLE_DASH_LONG_FLAGS: &[&str] = &[
    "domain",
    "subdomain",
    "ttl",
    "ip-url",
    "dry-run",
    "config",
    "quiet",
    "verbose",
];

/// Options shared by both tools
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Credential file (default: $NFSN_API_CONFIG or ~/.nfsn-api)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Update a DNS record on NFSN to match your public IP
#[derive(Parser, Debug)]
#[command(name = "dyndns", version, about, long_about = None)]
pub struct DyndnsArgs {
    /// Which domain to modify
    #[arg(long)]
    pub domain: String,

    /// Which subdomain tracks the public IP (e.g. "home", "*")
    #[arg(long)]
    pub subdomain: String,

    /// TTL of the created record, in seconds
    #[arg(long, default_value_t = DEFAULT_DYNDNS_TTL)]
    pub ttl: u32,

    /// IP echo service answering {"ip": "..."}
    #[arg(long, env = "NFSN_IP_SERVICE", default_value = DEFAULT_IP_SERVICE)]
    pub ip_url: String,

    /// Show what would change without touching DNS
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl DyndnsArgs {
    /// Parse `args`, first rewriting `-domain`-style flags to `--domain`
    pub fn try_parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(with_double_dash_flags(args))
    }
}

/// Rewrite single-dash long flags (`-domain`, `-ttl=60`) to their `--` form
///
/// Arguments after a bare `--` and anything that is not a known long flag
/// are passed through untouched.
pub fn with_double_dash_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut rewritten = Vec::new();
    let mut options_done = false;

    for arg in args.into_iter().map(Into::into) {
        if options_done {
            rewritten.push(arg);
            continue;
        }
        if arg == "--" {
            options_done = true;
            rewritten.push(arg);
            continue;
        }

        let single_dash_flag = arg
            .to_str()
            .and_then(|text| text.strip_prefix('-'))
            .filter(|rest| !rest.starts_with('-'))
            .filter(|rest| {
                let name = rest.split_once('=').map_or(*rest, |(name, _)| name);
                SINGLE_DASH_LONG_FLAGS.contains(&name)
            })
            .map(|rest| OsString::from(format!("--{}", rest)));

        rewritten.push(single_dash_flag.unwrap_or(arg));
    }

    rewritten
}

/// Read and edit DNS records on NFSN
#[derive(Parser, Debug)]
#[command(name = "nfsn-dns", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct DnsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DnsCommand {
    /// List the records of a domain
    List {
        /// Domain to list
        domain: String,
    },

    /// Add a record
    Add {
        #[command(flatten)]
        record: RecordArgs,

        /// TTL in seconds (provider default when omitted)
        #[arg(long)]
        ttl: Option<u32>,
    },

    /// Delete a record (matched on name, type and data)
    Delete {
        #[command(flatten)]
        record: RecordArgs,
    },
}

/// A record on the command line
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RecordArgs {
    /// Domain the record belongs to
    pub domain: String,

    /// Record name relative to the domain ("" for the apex)
    pub name: String,

    /// Record type (A, AAAA, CNAME, MX, NS, TXT, ...)
    #[arg(value_name = "TYPE")]
    pub record_type: String,

    /// Record data
    pub data: String,
}
