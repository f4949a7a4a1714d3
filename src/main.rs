use anyhow::{bail, Context};
use bulletin_split::{
    cli, config, directory, document, job, logging, mailer, package, report, splitter,
};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, MailTemplate};
use dialoguer::Confirm;
use document::PageSource;
use indicatif::{ProgressBar, ProgressStyle};
use job::{DeliveryStatus, JobStore, JsonJobStore};
use mailer::{DryRunMailer, Mailer, SmtpMailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load().context("loading config")?;

    match cli.command {
        Commands::Split { pdf, spreadsheet, output, xlsx } => {
            println!("📄 bulletin-split - split\n");
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());

            // 1. Staff directory
            println!("[1/3] Loading directory...");
            let directory = directory::Directory::load(&spreadsheet)
                .with_context(|| format!("reading {}", spreadsheet.display()))?;
            println!("✔ {} employees\n", directory.len());

            // 2. Split
            println!("[2/3] Splitting pages...");
            let doc = document::PdfDocument::load(&pdf)
                .with_context(|| format!("reading {}", pdf.display()))?;
            let pb = progress_bar(doc.page_count() as u64);
            let results = splitter::split_and_match_with(&doc, &directory, &output_dir, |r| {
                pb.set_message(r.output_filename.clone());
                pb.inc(1);
            })?;
            pb.finish_and_clear();
            println!("✔ {} pages written to {}\n", results.len(), output_dir.display());

            // 3. Report
            println!("[3/3] Writing report...");
            let json_path = output_dir.join(report::REPORT_JSON);
            report::write_json(&results, &json_path)?;
            println!("✔ {}", json_path.display());
            if xlsx {
                let xlsx_path = output_dir.join(report::REPORT_XLSX);
                report::write_xlsx(&results, &xlsx_path)?;
                println!("✔ {}", xlsx_path.display());
            }

            let summary = report::summarize(&results);
            println!("\nPages: {}", summary.total);
            println!("  found:     {}", summary.found);
            println!("  not found: {}", summary.not_found);
            if summary.missing_email > 0 {
                println!("  no email:  {}", summary.missing_email);
            }
            for r in results.iter().filter(|r| !r.is_found()) {
                println!("  ⚠ page {} unmatched → {}", r.page_index + 1, r.output_filename);
            }

            println!("\n✅ Done");
        }

        Commands::Package { files, all, source, output } => {
            println!("📦 bulletin-split - package\n");
            let source_dir = source.unwrap_or_else(|| config.output_dir.clone());
            let zip_path = output.unwrap_or_else(|| source_dir.join(package::DEFAULT_ARCHIVE_NAME));

            let names = if all { package::list_pdfs(&source_dir)? } else { files };
            let count = package::package_files(&names, &source_dir, &zip_path)?;

            println!("✔ {} files → {}", count, zip_path.display());
        }

        Commands::Send {
            report: report_path,
            only,
            include_unmatched,
            subject,
            body,
            dry_run,
            yes,
        } => {
            println!("✉️  bulletin-split - send\n");

            let results = report::read_json(&report_path)
                .with_context(|| format!("reading {}", report_path.display()))?;
            let recipients = mailer::select_recipients(&results, &only, include_unmatched);
            if recipients.is_empty() {
                bail!("no recipients selected");
            }

            let template = MailTemplate {
                subject: subject.unwrap_or_else(|| config.mail.subject.clone()),
                body: body.unwrap_or_else(|| config.mail.body.clone()),
            };
            let dry_run = dry_run || !config.has_smtp_credentials();

            println!("Recipients: {}", recipients.len());
            println!("Subject:    {}", template.subject);
            if dry_run {
                println!("Mode:       dry run (nothing is sent)");
            }

            if !yes {
                let proceed = Confirm::new()
                    .with_prompt("Send now?")
                    .default(false)
                    .interact()?;
                if !proceed {
                    println!("Cancelled");
                    return Ok(());
                }
            }

            let mut store = JsonJobStore::open(&config.jobs_file)
                .with_context(|| format!("opening {}", config.jobs_file.display()))?;
            let job = store.create()?;
            println!("\nJob: {}\n", job.id);

            let job = if dry_run {
                run_send(&recipients, &template, &DryRunMailer, &mut store, &job.id).await?
            } else {
                let mailer = SmtpMailer::new(&config.smtp, config.sender())?;
                run_send(&recipients, &template, &mailer, &mut store, &job.id).await?
            };

            println!(
                "\n✅ {}: {} sent, {} failed, {} skipped",
                job.status,
                job.count(DeliveryStatus::Sent),
                job.count(DeliveryStatus::Failed),
                job.count(DeliveryStatus::Skipped)
            );
        }

        Commands::Job { id } => {
            let store = JsonJobStore::open(&config.jobs_file)?;
            let job = store
                .get(&id)?
                .ok_or_else(|| bulletin_split::error::SplitError::JobNotFound(id.clone()))?;

            println!("Job {}", job.id);
            println!("  status:  {}", job.status);
            println!("  created: {}", job.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
            for log in &job.logs {
                println!(
                    "  {:<8} {:<30} {}{}",
                    log.status,
                    log.recipient_email,
                    log.filename.as_deref().unwrap_or(""),
                    log.error_message.as_deref().map(|e| format!(" ({})", e)).unwrap_or_default()
                );
            }
        }

        Commands::Config {
            show,
            set_smtp_host,
            set_smtp_port,
            set_smtp_user,
            set_smtp_password,
            set_from_email,
            set_from_name,
            set_output_dir,
        } => {
            // Edit the file as saved so environment overrides are not persisted
            let mut config = Config::load_file()?;
            let mut changed = false;

            if let Some(host) = set_smtp_host {
                config.smtp.host = host;
                changed = true;
            }
            if let Some(port) = set_smtp_port {
                config.smtp.port = port;
                changed = true;
            }
            if let Some(user) = set_smtp_user {
                config.smtp.username = user;
                changed = true;
            }
            if let Some(password) = set_smtp_password {
                config.smtp.password = Some(password);
                changed = true;
            }
            if let Some(email) = set_from_email {
                config.smtp.from_email = email;
                changed = true;
            }
            if let Some(name) = set_from_name {
                config.smtp.from_name = name;
                changed = true;
            }
            if let Some(dir) = set_output_dir {
                config.jobs_file = dir.join("jobs.json");
                config.output_dir = dir;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ Saved {}", Config::config_path()?.display());
            }

            if show || !changed {
                print_config(&Config::load()?);
            }
        }
    }

    Ok(())
}

async fn run_send<M: Mailer>(
    recipients: &[bulletin_split_common::PageResult],
    template: &MailTemplate,
    mailer: &M,
    store: &mut JsonJobStore,
    job_id: &str,
) -> anyhow::Result<job::Job> {
    let job = mailer::send_batch_with(recipients, template, mailer, store, job_id, |log| {
        let mark = match log.status {
            DeliveryStatus::Sent => "✔",
            DeliveryStatus::Failed => "✘",
            DeliveryStatus::Skipped => "-",
        };
        println!(
            "{} {} {}",
            mark,
            log.filename.as_deref().unwrap_or(""),
            log.error_message.as_deref().unwrap_or(&log.recipient_email)
        );
    })
    .await?;
    Ok(job)
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn print_config(config: &Config) {
    println!("Config:");
    println!("  output dir: {}", config.output_dir.display());
    println!("  jobs file:  {}", config.jobs_file.display());
    println!("  SMTP:       {}:{}", config.smtp.host, config.smtp.port);
    println!("  user:       {}", config.smtp.username);
    println!(
        "  password:   {}",
        if config.smtp.password.is_some() { "********" } else { "not set" }
    );
    println!("  from:       {} <{}>", config.smtp.from_name, config.sender());
    println!("  subject:    {}", config.mail.subject);
}
