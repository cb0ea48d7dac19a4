// # nfsn-dns - list, add and delete NFSN DNS records
//
// ```bash
// nfsn-dns list example.com
// nfsn-dns add example.com www A 203.0.113.7 --ttl 600
// nfsn-dns delete example.com www A 203.0.113.7
// ```
//
// `list` prints one tab-separated record per line: name, type, data, ttl.

use clap::Parser;
use nfsn_cli::args::{DnsArgs, DnsCommand, RecordArgs};
use nfsn_cli::{CliExitCode, load_client, logging, report_parse_error, runtime};
use nfsn_client::NfsnClient;
use nfsn_core::{DnsRecord, Result};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = match DnsArgs::try_parse() {
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

    let rt = match runtime() {
        Ok(rt) => rt,
        Err(e) => {
            error!("{}", e);
            return CliExitCode::RuntimeError.into();
        }
    };

    match rt.block_on(run(&client, args.command)) {
        Ok(()) => CliExitCode::Success.into(),
        Err(e) => {
            error!("{}", e);
            CliExitCode::RuntimeError.into()
        }
    }
}

async fn run(client: &NfsnClient, command: DnsCommand) -> Result<()> {
    match command {
        DnsCommand::List { domain } => {
            for record in client.list_records(&domain).await? {
                println!("{}", format_row(&record));
            }
        }
        DnsCommand::Add { record, ttl } => {
            let (domain, mut rr) = into_record(record);
            rr.ttl = ttl;
            client.add_record(&domain, &rr).await?;
            info!("Added {} to {}", rr, domain);
        }
        DnsCommand::Delete { record } => {
            let (domain, rr) = into_record(record);
            client.delete_record(&domain, &rr).await?;
            info!("Deleted {} from {}", rr, domain);
        }
    }
    Ok(())
}

fn into_record(args: RecordArgs) -> (String, DnsRecord) {
    let record = DnsRecord::new(args.name, args.record_type.to_uppercase(), args.data);
    (args.domain, record)
}

fn format_row(record: &DnsRecord) -> String {
    let ttl = record.ttl.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string());
    format!("{}\t{}\t{}\t{}", record.name, record.record_type, record.data, ttl)
}
