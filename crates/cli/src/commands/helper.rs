// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ph helper <app-id>` - Show which helper handles an app

use anyhow::{anyhow, bail, Result};
use clap::Args;
use ph_adapters::HelperInfo;
use ph_core::AppId;
use ph_engine::default_launchers;

#[derive(Args)]
pub struct HelperArgs {
    /// Application id
    pub app: String,

    /// Helper kind; click for click apps, legacy otherwise
    #[arg(long)]
    pub kind: Option<String>,
}

pub fn handle(args: HelperArgs) -> Result<()> {
    let app = AppId::parse(&args.app)?;
    let kind = super::resolve_kind(args.kind.as_deref(), &app);
    let launchers = default_launchers();
    let launcher = launchers
        .get(&kind)
        .ok_or_else(|| anyhow!("no launcher for kind {kind}"))?;

    let Some(info) = launcher.helper_info(&app) else {
        bail!("no helper found for {app}");
    };
    print!("{}", format_helper(&info));
    Ok(())
}

fn format_helper(info: &HelperInfo) -> String {
    let id = if info.app_id.is_empty() {
        "-"
    } else {
        info.app_id.as_str()
    };
    format!("helper: {id}\nexec: {}\n", info.exec.display())
}

#[cfg(test)]
#[path = "helper_tests.rs"]
mod tests;
