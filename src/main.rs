use anyhow::Result;
use log::{error, info};
use serde_json::json;

use darwin_snapshot::{
    accounts, active_usernames, interfaces, mounts, network_activity, process_arguments,
    processes, sessions,
};

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut snapshot = json!({
        "collected_at": chrono::Utc::now(),
    });

    match processes() {
        Ok(procs) => {
            info!("collected {} processes", procs.len());
            snapshot["processes"] = json!(procs);
        }
        Err(err) => error!("Failed to collect process table: {}", err),
    }

    // our own argument vector doubles as a liveness check for the
    // variable-length buffer decoder
    match process_arguments(std::process::id() as i32) {
        Ok(args) => snapshot["self_arguments"] = json!(args),
        Err(err) => error!("Failed to collect own arguments: {}", err),
    }

    match mounts() {
        Ok(mounts) => {
            info!("collected {} device mounts", mounts.len());
            snapshot["mounts"] = json!(mounts);
        }
        Err(err) => error!("Failed to collect mount table: {}", err),
    }

    match sessions() {
        Ok(sessions) => {
            info!("collected {} sessions", sessions.len());
            snapshot["sessions"] = json!(sessions);
        }
        Err(err) => error!("Failed to collect sessions: {}", err),
    }

    match active_usernames() {
        Ok(users) => snapshot["active_users"] = json!(users),
        Err(err) => error!("Failed to collect active usernames: {}", err),
    }

    match accounts() {
        Ok(accounts) => {
            info!("collected {} accounts", accounts.len());
            snapshot["accounts"] = json!(accounts);
        }
        Err(err) => error!("Failed to collect accounts: {}", err),
    }

    match interfaces() {
        Ok(interfaces) => {
            info!("collected {} interface addresses", interfaces.len());
            snapshot["interfaces"] = json!(interfaces);
        }
        Err(err) => error!("Failed to collect interfaces: {}", err),
    }

    match network_activity() {
        Ok(stats) => {
            info!("network activity: {}", stats);
            snapshot["network_activity"] = json!(stats);
        }
        Err(err) => error!("Failed to collect network activity: {}", err),
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
