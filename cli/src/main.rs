//! Proposal Studio CLI binary.
//!
//! Subcommands: `serve` (web form on 127.0.0.1:8501) and `generate` (one proposal, PDF to disk).

mod log_format;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{make_generator, report_config_load, run_generate, run_serve, GenerateOptions};
use proposal::LeadForm;
use serve::ServeConfig;

#[derive(Parser, Debug)]
#[command(name = "proposal")]
#[command(about = "Proposal Studio: draft personalized payment-platform proposals for sales leads")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Chat model (default: PROPOSAL_MODEL or gpt-3.5-turbo)
    #[arg(long, global = true, value_name = "MODEL")]
    model: Option<String>,

    /// Answer every request with TEXT instead of calling OpenAI (offline demos)
    #[arg(long, global = true, value_name = "TEXT", env = "PROPOSAL_MOCK_TEXT")]
    mock: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Serve the lead form and proposal page over HTTP
    Serve(ServeArgs),
    /// Generate one proposal and write the PDF to disk
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address (default: PROPOSAL_ADDR or 127.0.0.1:8501)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
    /// Also save every rendered PDF in DIR (default: PROPOSAL_OUTPUT_DIR)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
struct GenerateArgs {
    /// Lead name
    #[arg(long, value_name = "NAME")]
    name: String,
    /// Company name
    #[arg(long, value_name = "COMPANY")]
    company: String,
    /// Industry (default: Travel)
    #[arg(long, value_name = "INDUSTRY")]
    industry: Option<String>,
    /// Use case; repeat for several, e.g. --use-case "Pay In" --use-case "Pay Out"
    #[arg(long = "use-case", value_name = "USE_CASE")]
    use_cases: Vec<String>,
    /// Required currency; repeat for several
    #[arg(long = "currency", value_name = "CURRENCY")]
    currencies: Vec<String>,
    /// Additional requirements
    #[arg(long, value_name = "TEXT", default_value = "")]
    notes: String,
    /// Directory for the PDF
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

impl GenerateArgs {
    fn into_options(self) -> GenerateOptions {
        GenerateOptions {
            form: LeadForm {
                name: self.name,
                company: self.company,
                industry: self.industry,
                use_cases: self.use_cases,
                currencies: self.currencies,
                notes: self.notes,
            },
            out_dir: self.out_dir,
        }
    }
}

fn serve_config(args: &ServeArgs) -> ServeConfig {
    let mut config = ServeConfig::from_env();
    if let Some(ref addr) = args.addr {
        config.addr = addr.clone();
    }
    if let Some(ref dir) = args.output_dir {
        config.output_dir = Some(dir.clone());
    }
    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before logging so RUST_LOG / LOG_FILE may come from .env; reported once logging is up.
    let loaded = config::load_and_apply(config::APP_NAME, None);
    logging::init()?;
    report_config_load(&loaded);

    let args = Args::parse();
    let generator = make_generator(args.mock.clone(), args.model.clone());

    match args.cmd {
        Command::Serve(sa) => {
            if let Err(e) = run_serve(serve_config(&sa), generator).await {
                eprintln!("proposal: {}", e);
                std::process::exit(1);
            }
        }
        Command::Generate(ga) => match run_generate(generator, ga.into_options()).await {
            Ok(output) => {
                println!("{}", output.text);
                eprintln!("Proposal saved to {}", output.path.display());
            }
            Err(e) => {
                eprintln!("proposal: {}", e);
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
