use anyhow::Result;
use clap::Parser;
use gemini_image_editor::app::EditSession;
use gemini_image_editor::image::ImageFile;
use gemini_image_editor::models::Config;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-image-editor")]
#[command(about = "Edit an image with a natural-language instruction")]
struct CliArgs {
    /// Local image file to edit.
    #[arg(long, value_name = "PATH", conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Remote image URL to edit. Defaults to the placeholder image.
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Override the MIME type declared for --file.
    #[arg(long, value_name = "TYPE", requires = "file")]
    mime_type: Option<String>,

    /// Edit instruction.
    #[arg(short, long)]
    prompt: String,

    /// Where to write the edited image.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

async fn run(args: CliArgs) -> Result<PathBuf> {
    let config = Config::from_env()?;
    let mut session = EditSession::from_config(&config)?;

    match (&args.file, &args.url) {
        (Some(path), _) => {
            let mut file = ImageFile::from_path(path);
            if let Some(mime_type) = &args.mime_type {
                file = file.with_mime_type(mime_type.clone());
            }
            session
                .load_file(&file)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load image: {}", e))?;
        }
        (None, Some(url)) => {
            session.load_url(url).await?;
        }
        (None, None) => {
            session
                .load_url(&config.placeholder_url)
                .await
                .map_err(|e| {
                    error!("{}", e);
                    anyhow::anyhow!("Failed to load initial placeholder image.")
                })?;
        }
    }

    session.submit(&args.prompt).await?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| session.default_output_path());
    session.save_edited(&output).await?;
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_image_editor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(output) => {
            info!("Edited image saved to {}", output.display());
            println!("{}", output.display());
            Ok(())
        }
        Err(e) => {
            error!("Edit failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_file_and_prompt() {
        let args = CliArgs::try_parse_from([
            "gemini-image-editor",
            "--file",
            "cat.png",
            "--prompt",
            "add a hat",
        ])
        .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("cat.png")));
        assert_eq!(args.prompt, "add a hat");
        assert!(args.url.is_none());
    }

    #[test]
    fn test_cli_rejects_file_and_url_together() {
        let result = CliArgs::try_parse_from([
            "gemini-image-editor",
            "--file",
            "cat.png",
            "--url",
            "https://example.com/cat.png",
            "-p",
            "x",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_prompt() {
        let result = CliArgs::try_parse_from(["gemini-image-editor", "--file", "cat.png"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_mime_type_requires_file() {
        let result = CliArgs::try_parse_from([
            "gemini-image-editor",
            "--mime-type",
            "image/png",
            "-p",
            "x",
        ]);
        assert!(result.is_err());
    }
}
