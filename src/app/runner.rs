use crate::config::CliConfig;
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::Validate;
use crate::{
    ConfigSession, HttpPlanService, JsonConfigStore, OpenHolidaysClient, PlanEngine,
    SessionCommand, Settings,
};
use std::path::PathBuf;

/// Runs one CLI invocation and returns the path of the written plan.
pub async fn run(config: CliConfig) -> Result<PathBuf> {
    config.validate()?;
    let settings = Settings::from_file_or_default(&config.settings)?;
    settings.validate()?;

    let config_path = config
        .config
        .clone()
        .or_else(|| settings.storage.config_path.as_ref().map(PathBuf::from));
    let engine = PlanEngine::new(
        HttpPlanService::new(settings.plan_service.endpoint.clone()),
        OpenHolidaysClient::new(
            settings.holidays.endpoint.clone(),
            settings.holidays.language.clone(),
        ),
        JsonConfigStore::new(config_path),
    );

    let mut session = ConfigSession::new();
    session.apply(SessionCommand::SetExcludeSunday(
        settings.defaults.exclude_sunday,
    ))?;

    if !engine.load_session(&mut session).await? {
        tracing::info!("No building configuration given, starting from a single ground floor");
    }

    let country = config.country.clone().or(settings.defaults.country.clone());
    if country.is_some() {
        session.apply(SessionCommand::SetCountry(country))?;
        let subdivision = config
            .subdivision
            .clone()
            .or(settings.defaults.subdivision.clone());
        if config.fetch_holidays {
            if let Err(e) = engine.refresh_subdivisions(&mut session).await {
                tracing::warn!("Could not load subdivisions: {}", e);
            }
        }
        session.apply(SessionCommand::SetSubdivision(subdivision))?;
    }

    for command in config.session_commands() {
        session.apply(command)?;
    }

    if config.fetch_holidays {
        match engine.import_holidays(&mut session).await {
            Ok(count) => tracing::info!("Imported {} public holidays", count),
            Err(e) => tracing::warn!("Continuing without public holidays: {}", e),
        }
    }

    if config.save && !engine.save_session(&mut session).await? {
        tracing::info!("No configuration file given, nothing saved");
    }

    for note in session.take_notifications() {
        eprintln!("⚠️  {} ({})", note.message, note.suggestion);
    }
    let preview = engine.render_preview(&mut session).await?;

    if let Some(parent) = config.output.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(PlannerError::IoError)?;
        }
    }
    tokio::fs::write(&config.output, preview).await?;
    Ok(config.output)
}
