use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use im_proto::{build_group_image_upload, parse_group_image_upload_response, ProtoError};
use im_sign::{PacketSigner, SignConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Group media upload and packet signing tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a group image upload envelope from a picture file
    Upload {
        #[arg(long)]
        group: u32,
        #[arg(long)]
        file: PathBuf,
        /// Write the raw envelope here instead of printing it as hex
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode a group image upload response envelope
    ParseResponse {
        #[arg(long)]
        file: PathBuf,
    },
    /// Ask the sign service to sign one packet
    Sign {
        #[arg(long, env = "SIGN_SERVER_URL")]
        endpoint: String,
        #[arg(long)]
        cmd: String,
        #[arg(long)]
        seq: i32,
        #[arg(long, default_value = "")]
        body_hex: String,
        /// Additional commands to treat as signable
        #[arg(long, value_delimiter = ',')]
        extra_command: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Upload { group, file, out } => upload_command(group, file, out),
        Commands::ParseResponse { file } => parse_response_command(file),
        Commands::Sign {
            endpoint,
            cmd,
            seq,
            body_hex,
            extra_command,
        } => sign_command(endpoint, cmd, seq, body_hex, extra_command).await,
    }
}

fn upload_command(group: u32, file: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let reader = File::open(&file).with_context(|| format!("open {}", file.display()))?;
    let built = build_group_image_upload(group, BufReader::new(reader))
        .map_err(|e| anyhow!("build upload for {}: {e}", file.display()))?;
    let req = &built.request;

    println!("command:  {}", built.packet.command);
    println!("group:    {}", req.group_id);
    println!("size:     {}", req.file_size);
    println!("md5:      {}", req.md5_hex);
    println!("sha1:     {}", req.sha1_hex);
    println!("name:     {}", req.file_name);
    println!("format:   {:?} ({})", req.picture_format, req.picture_format.code());
    println!("pixels:   {}x{}", req.width, req.height);
    println!("nonce:    {}", req.client_nonce);

    match out {
        Some(path) => {
            std::fs::write(&path, &built.packet.data)
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), bytes = built.packet.data.len(), "envelope written");
        }
        None => println!("envelope: {}", hex::encode(&built.packet.data)),
    }
    Ok(())
}

fn parse_response_command(file: PathBuf) -> Result<()> {
    let data = std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
    match parse_group_image_upload_response(&data) {
        Ok(resp) => {
            if let Some(head) = resp.resp_head {
                println!("ret_code: {}", head.ret_code);
                println!("message:  {}", head.message);
            }
            match resp.upload {
                Some(upload) if !upload.u_key.is_empty() => {
                    println!("ukey:     {}", upload.u_key);
                    println!("ttl:      {}s", upload.u_key_ttl_second);
                }
                Some(_) => println!("ukey:     <none, file already on server>"),
                None => println!("upload:   <absent>"),
            }
            Ok(())
        }
        Err(ProtoError::RemoteRejected { code, message }) => {
            Err(anyhow!("upload rejected by server (code {code}): {message}"))
        }
        Err(err) => Err(anyhow!("decode response: {err}")),
    }
}

async fn sign_command(
    endpoint: String,
    cmd: String,
    seq: i32,
    body_hex: String,
    extra_commands: Vec<String>,
) -> Result<()> {
    let body = hex::decode(body_hex.trim()).map_err(|e| anyhow!("decode body hex: {e}"))?;
    let mut config = SignConfig::new(endpoint);
    config.extra_commands = extra_commands;
    let signer = PacketSigner::new(&config)?;

    match signer.sign(&cmd, seq, &body).await {
        Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        None => println!("no signature"),
    }
    Ok(())
}
