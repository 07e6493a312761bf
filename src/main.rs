use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::path::PathBuf;
use subnet_planner::config::{OutputFormat, Settings};
use subnet_planner::output::{render_csv, render_json, render_table};
use subnet_planner::{calculate, PlanMode, PlanRequest};

/// Split an IPv4 network into equal, VLSM or hybrid subnets
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base network address, e.g. 192.168.0.0
    #[arg(short, long)]
    address: Option<String>,

    /// Dotted subnet mask, e.g. 255.255.255.0
    #[arg(short, long)]
    mask: Option<String>,

    /// Number of subnets (count and hybrid modes)
    #[arg(short, long)]
    count: Option<usize>,

    /// Hosts per subnet, comma separated
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    hosts: Option<Vec<i64>>,

    /// auto, count, hosts (vlsm) or hybrid
    #[arg(long)]
    mode: Option<PlanMode>,

    /// JSON request file; its fields override SUBNET_* settings, flags override both
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// csv, table or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Reject addresses in private ranges
    #[arg(long)]
    deny_private: bool,

    #[arg(long)]
    allow_loopback: bool,

    #[arg(long)]
    allow_link_local: bool,

    #[arg(long)]
    allow_multicast: bool,

    #[arg(long)]
    allow_reserved: bool,

    #[arg(long)]
    allow_cgnat: bool,

    /// Allow /31 and /32 blocks, which have no usable hosts
    #[arg(long)]
    allow_zero_host_blocks: bool,
}

fn init_logging() {
    if log4rs::init_file("log4rs.yml", Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder().target(Target::Stderr).build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    if let Ok(config) = config {
        log4rs::init_config(config).ok();
    }
}

/// Fold environment settings, the request file and flags into one request.
fn build_request(args: &Args, settings: &Settings) -> Result<PlanRequest, Box<dyn Error>> {
    let defaults = PlanRequest {
        policy: settings.policy,
        require_usable_hosts: settings.require_usable_hosts,
        ..Default::default()
    };
    let mut request = match &args.request {
        Some(path) => PlanRequest::from_file_with_defaults(path, &defaults)?,
        None => defaults,
    };

    if let Some(address) = &args.address {
        request.address = address.clone();
    }
    if let Some(mask) = &args.mask {
        request.mask = mask.clone();
    }
    if let Some(count) = args.count {
        request.subnet_count = count;
    }
    if let Some(hosts) = &args.hosts {
        request.host_demands = hosts.clone();
    }
    if let Some(mode) = args.mode {
        request.mode = mode;
    }

    let policy = &mut request.policy;
    policy.allow_private &= !args.deny_private;
    policy.allow_loopback |= args.allow_loopback;
    policy.allow_link_local |= args.allow_link_local;
    policy.allow_multicast |= args.allow_multicast;
    policy.allow_reserved |= args.allow_reserved;
    policy.allow_cgnat |= args.allow_cgnat;
    request.require_usable_hosts &= !args.allow_zero_host_blocks;

    if request.address.is_empty() || request.mask.is_empty() {
        return Err("Both --address and --mask (or a request file) are required".into());
    }
    Ok(request)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let args = Args::parse();
    let settings = Settings::from_env();
    let request = build_request(&args, &settings)?;
    log::debug!("request: {request:?}");

    let plan = match calculate(&request) {
        Ok(plan) => plan,
        Err(e) => {
            log::warn!("calculation failed ({:?}): {e}", e.category());
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match args.format.unwrap_or(settings.output) {
        OutputFormat::Csv => print!("{}", render_csv(&plan)),
        OutputFormat::Table => print!("{}", render_table(&plan)),
        OutputFormat::Json => println!("{}", render_json(&plan)?),
    }

    Ok(())
}
