// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ph run --app <id>` - Run one notification through the helper pool

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use ph_core::{AppId, HelperInput};
use ph_engine::{default_launchers, HelperPool, PoolConfig};

const DEFAULT_PAYLOAD: &str = "{}";

#[derive(Args)]
pub struct RunArgs {
    /// Application id (e.g. "com.example.app_app_1.0" or "_legacy-app")
    #[arg(long)]
    pub app: String,

    /// Helper kind; click for click apps, legacy otherwise
    #[arg(long)]
    pub kind: Option<String>,

    /// Notification id
    #[arg(long, default_value = "")]
    pub id: String,

    /// Payload handed to the helper verbatim
    #[arg(long, conflicts_with = "payload_file")]
    pub payload: Option<String>,

    /// Read the payload from a file
    #[arg(long)]
    pub payload_file: Option<PathBuf>,
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let app = AppId::parse(&args.app)?;
    let kind = super::resolve_kind(args.kind.as_deref(), &app);
    let payload = read_payload(&args)?;

    tracing::debug!(%app, %kind, payload_len = payload.len(), "submitting job");
    let pool = HelperPool::new(default_launchers(), PoolConfig::from_env());
    let mut results = pool.start()?;
    pool.run(kind, HelperInput::new(app, args.id, payload)).await?;
    let result = results
        .recv()
        .await
        .ok_or_else(|| anyhow!("helper pool exited without a result"))?;
    pool.stop().await?;

    println!("{}", serde_json::to_string(&result.output)?);
    Ok(())
}

fn read_payload(args: &RunArgs) -> Result<Vec<u8>> {
    if let Some(path) = &args.payload_file {
        return std::fs::read(path)
            .with_context(|| format!("can't read payload file {}", path.display()));
    }
    Ok(args
        .payload
        .as_deref()
        .unwrap_or(DEFAULT_PAYLOAD)
        .as_bytes()
        .to_vec())
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
