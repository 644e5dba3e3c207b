#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eyre::Result;

mod commands;
mod state;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .manage(state::DesktopState::default())
        .invoke_handler(tauri::generate_handler![
            commands::configure,
            commands::get_config,
            commands::load_form,
            commands::retry_load,
            commands::get_form,
            commands::handle_field,
            commands::add_picture_file,
            commands::remove_picture,
            commands::validate_form,
            commands::submit_form,
            commands::get_submission_state,
            commands::reset_form,
        ])
        .run(tauri::generate_context!())
        .map_err(|e| eyre::eyre!("tauri error: {e}"))?;

    Ok(())
}
