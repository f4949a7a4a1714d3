use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bulletin-split")]
#[command(about = "Split payslip PDFs per employee and mail them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a payslip PDF into one file per page and match each page to an employee
    Split {
        /// Multi-page payslip PDF
        #[arg(required = true)]
        pdf: PathBuf,

        /// Staff directory spreadsheet (sheet "EMAIL SALAIRE ")
        #[arg(required = true)]
        spreadsheet: PathBuf,

        /// Output directory (default: from config, "completed")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write report.xlsx
        #[arg(long)]
        xlsx: bool,
    },

    /// Bundle split payslips into a ZIP archive
    Package {
        /// File names inside the source directory
        files: Vec<String>,

        /// Take every PDF in the source directory
        #[arg(long, conflicts_with = "files")]
        all: bool,

        /// Directory holding the split files (default: output directory)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Archive path (default: <source>/bulletins.zip)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mail each matched payslip to its employee
    Send {
        /// report.json written by `split`
        #[arg(required = true)]
        report: PathBuf,

        /// Only these matricules (repeatable)
        #[arg(long = "only", value_name = "ID")]
        only: Vec<String>,

        /// Also include unmatched pages (they have no address and are skipped)
        #[arg(long)]
        include_unmatched: bool,

        /// Mail subject (default: from config)
        #[arg(long)]
        subject: Option<String>,

        /// Mail body (default: from config)
        #[arg(long)]
        body: Option<String>,

        /// Log messages instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Do not ask for confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a send job and its per-recipient log
    Job {
        /// Job id printed by `send`
        #[arg(required = true)]
        id: String,
    },

    /// Show or edit the configuration
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,

        #[arg(long)]
        set_smtp_host: Option<String>,

        #[arg(long)]
        set_smtp_port: Option<u16>,

        #[arg(long)]
        set_smtp_user: Option<String>,

        #[arg(long)]
        set_smtp_password: Option<String>,

        /// Sender address (default: SMTP user)
        #[arg(long)]
        set_from_email: Option<String>,

        #[arg(long)]
        set_from_name: Option<String>,

        #[arg(long)]
        set_output_dir: Option<PathBuf>,
    },
}
