//! assist — 星灿助手命令行前端
//!
//! Usage:
//!   assist chat                               Multi-turn chat (/reset, /exit)
//!   assist vision --image <path> [--prompt]   Ask about an image
//!   assist image --prompt <text> [--out]      Generate an image
//!   assist code --prompt <text>               Generate code
//!   assist tts --text <text> [--voice ...]    Text to speech
//!   assist video --prompt <text> [--size]     Text to video

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write as _;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use xingcan_assist::client::CompletionClient;
use xingcan_assist::config::ProviderConfig;
use xingcan_assist::download::{timestamped_path, Downloader, LogProgress};
use xingcan_assist::images::ImageClient;
use xingcan_assist::session::{ChatOptions, ChatSession};
use xingcan_assist::tts::{SpeechClient, TtsOptions, Voice};
use xingcan_assist::video::{VideoClient, VideoSize};

#[derive(Parser)]
#[command(name = "assist", version, about = "Xingcan AI assistants")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Multi-turn question answering
    Chat {
        #[arg(long, default_value = "glm-4-air-250414")]
        model: String,
        #[arg(long, default_value = "You are a helpful AI assistant.")]
        system: String,
    },
    /// Describe or answer questions about an image
    Vision {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long, default_value = "glm-4v")]
        model: String,
    },
    /// Generate an image from a description
    Image {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value = "cogView-4-250304")]
        model: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate code from a natural-language request
    Code {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value = "qwen2.5-coder-32b-instruct")]
        model: String,
        #[arg(long, default_value_t = 1024)]
        max_tokens: u32,
    },
    /// Convert text to speech
    Tts {
        #[arg(long)]
        text: String,
        /// Cherry, Serena, Ethan or Chelsie
        #[arg(long, default_value = "Cherry")]
        voice: String,
        #[arg(long, default_value_t = 1.0)]
        speed: f32,
        #[arg(long, default_value_t = 1.0)]
        pitch: f32,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a video from a description
    Video {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value = "1920*1080")]
        size: String,
        #[arg(long, default_value = "wan2.2-t2v-plus")]
        model: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Chat { model, system } => cmd_chat(model, system).await,
        Command::Vision {
            image,
            prompt,
            model,
        } => {
            let client = CompletionClient::new(&ProviderConfig::zhipu_from_env()?)?;
            let answer = client
                .describe_image(&model, &image, prompt.as_deref())
                .await
                .with_context(|| format!("analysing {}", image.display()))?;
            println!("{}", answer);
            Ok(())
        }
        Command::Image { prompt, model, out } => {
            let client = ImageClient::builder().model(model).build()?;
            let out = out.unwrap_or_else(|| timestamped_path("result/T2I", "image", "png"));
            let path = client
                .generate_to_file(&prompt, &Downloader::new()?, &out, &LogProgress::new("image"))
                .await?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Code {
            prompt,
            model,
            max_tokens,
        } => {
            let client = CompletionClient::new(&ProviderConfig::dashscope_compatible_from_env()?)?;
            let code = client.complete_text(&model, &prompt, max_tokens).await?;
            println!("{}", code);
            Ok(())
        }
        Command::Tts {
            text,
            voice,
            speed,
            pitch,
            out,
        } => {
            let voice = Voice::from_code(&voice)
                .with_context(|| format!("unknown voice '{}'", voice))?;
            let options = TtsOptions {
                voice,
                speed,
                pitch,
            };
            let client = SpeechClient::builder().build()?;
            let path = client
                .synthesize_to_file(
                    &text,
                    &options,
                    &Downloader::new()?,
                    out.as_deref(),
                    &LogProgress::new(voice.label()),
                )
                .await?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Video {
            prompt,
            size,
            model,
            out,
        } => {
            let size = VideoSize::parse(&size)?;
            let client = VideoClient::builder().model(model).build()?;
            let path = client
                .generate_to_file(
                    &prompt,
                    size,
                    &Downloader::new()?,
                    out.as_deref(),
                    &LogProgress::new("video"),
                )
                .await?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn cmd_chat(model: String, system: String) -> anyhow::Result<()> {
    let client = CompletionClient::new(&ProviderConfig::zhipu_from_env()?)?;
    let mut session = ChatSession::with_system_prompt(client, ChatOptions::new(model), system);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type a question. /reset clears history, /exit quits.");
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match line.trim() {
            "" => continue,
            "/exit" | "/quit" => break,
            "/reset" => {
                session.reset();
                println!("(history cleared)");
            }
            text => {
                let reply = session.send_or_apologize(text).await;
                println!("{}\n", reply);
            }
        }
    }
    Ok(())
}
