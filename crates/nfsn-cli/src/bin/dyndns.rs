// # dyndns - keep an NFSN DNS record pointed at your public IP
//
// Run it from cron:
//
// ```bash
// dyndns --domain example.com --subdomain home -q
// ```
//
// Single-dash long flags (`-domain example.com -subdomain home`) are accepted
// too, so existing cron lines keep working.
//
// One run:
// 1. Load the credential from ~/.nfsn-api (or --config / $NFSN_API_CONFIG)
// 2. Ask the IP echo service for the public IP
// 3. Reconcile the subdomain's A record (see nfsn_core::engine)
//
// The run is not atomic: if it is interrupted between deleting the stale
// record and adding the new one, the subdomain has no record until the next
// run.

use nfsn_cli::args::DyndnsArgs;
use nfsn_cli::{CliExitCode, describe_outcome, load_client, logging, report_parse_error, runtime};
use nfsn_core::{DyndnsConfig, DyndnsEngine};
use nfsn_ip_http::HttpIpSource;
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = match DyndnsArgs::try_parse_lenient(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => return report_parse_error(e).into(),
    };

    if let Err(e) = logging::init(&args.common) {
        eprintln!("{}", e);
        return CliExitCode::ConfigError.into();
    }

    let client = match load_client(args.common.config.as_deref()) {
        Ok(client) => client,
        Err(e) => {
            error!("Initialising: {}", e);
            return CliExitCode::ConfigError.into();
        }
    };

    let config = DyndnsConfig::new(args.domain, args.subdomain)
        .with_ttl(args.ttl)
        .with_dry_run(args.dry_run);

    let engine = match DyndnsEngine::new(
        Box::new(HttpIpSource::new(args.ip_url)),
        Box::new(client),
        config,
    ) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Initialising: {}", e);
            return CliExitCode::ConfigError.into();
        }
    };

    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            error!("{}", e);
            return CliExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(engine.reconcile()) {
        Ok(outcome) => {
            info!("{}", describe_outcome(&outcome, engine.config().dry_run));
            CliExitCode::Success.into()
        }
        Err(e) => {
            let config = engine.config();
            error!("Updating ({}).{}: {}", config.subdomain, config.domain, e);
            CliExitCode::RuntimeError.into()
        }
    }
}
