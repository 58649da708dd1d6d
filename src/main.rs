use clap::Parser;
use tailwind_config::{
    handle_pipe_command, list_files, resolve, validate_config, Cli, Commands, Severity,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Handle commands
    match cli.command {
        Commands::Validate(args) => {
            let (_, findings) = match validate_config(&args.config) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let mut errors = 0;
            let mut warnings = 0;
            for finding in &findings {
                match finding.severity {
                    Severity::Error => {
                        errors += 1;
                        eprintln!("error: {}: {}", finding.field, finding.message);
                    }
                    Severity::Warning => {
                        warnings += 1;
                        eprintln!("warning: {}: {}", finding.field, finding.message);
                    }
                }
            }

            if args.verbose {
                eprintln!(
                    "Checked {}: {} errors, {} warnings",
                    args.config.display(),
                    errors,
                    warnings
                );
            }

            if errors > 0 || (args.strict && warnings > 0) {
                std::process::exit(1);
            }

            println!("Configuration is valid");
            Ok(())
        }
        Commands::Resolve(args) => {
            let to_stdout = args.output.is_none();
            match resolve(args) {
                Ok(result) => {
                    if to_stdout {
                        println!("{}", result.rendered);
                    } else {
                        println!("Resolution successful!");
                        println!("  - {} content globs", result.report.counts.content_globs);
                        println!(
                            "  - {} tokens extended",
                            result.report.counts.tokens_extended
                        );
                        println!("  - {} plugins", result.report.counts.plugins);
                    }
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Files(args) => match list_files(args) {
            Ok(files) => {
                for file in files {
                    println!("{}", file.path.display());
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Pipe(args) => {
            // Handle pipe mode
            handle_pipe_command(args).await?;
            Ok(())
        }
    }
}
