use crate::core::session::{ConfigSession, SessionCommand};
use crate::core::{ConfigStore, HolidayProvider, PlanService};
use crate::domain::model::{Holiday, HolidayQuery, PlanRequest, SavedConfig, Subdivision};
use crate::utils::error::Result;

/// Talks to the external collaborators on behalf of a session.
///
/// The plain methods are request/response calls on owned inputs, so a caller
/// can keep issuing session commands while one is outstanding. The
/// `*_session` helpers build the request from a session, await the reply,
/// apply it as a command, and report failures as notifications.
pub struct PlanEngine<P: PlanService, H: HolidayProvider, S: ConfigStore> {
    plan_service: P,
    holiday_provider: H,
    store: S,
}

impl<P: PlanService, H: HolidayProvider, S: ConfigStore> PlanEngine<P, H, S> {
    pub fn new(plan_service: P, holiday_provider: H, store: S) -> Self {
        Self {
            plan_service,
            holiday_provider,
            store,
        }
    }

    pub async fn create_plan(&self, request: &PlanRequest) -> Result<String> {
        tracing::debug!(
            "Requesting plan for {} ({} floors, {} holidays)",
            request.year,
            request.config.position_map.len(),
            request.holidays.len()
        );
        let preview = self.plan_service.create_laundry_plan(request).await?;
        tracing::debug!("Received plan preview ({} bytes)", preview.len());
        Ok(preview)
    }

    pub async fn subdivisions(&self, country_iso: &str) -> Result<Vec<Subdivision>> {
        tracing::debug!("Looking up subdivisions of {}", country_iso);
        let subdivisions = self.holiday_provider.get_subdivisions(country_iso).await?;
        tracing::debug!("Found {} subdivisions", subdivisions.len());
        Ok(subdivisions)
    }

    pub async fn holidays(&self, query: &HolidayQuery) -> Result<Vec<Holiday>> {
        tracing::debug!(
            "Looking up holidays for {} in {}/{}",
            query.year,
            query.country_iso,
            query.subdivision_iso
        );
        let holidays = self
            .holiday_provider
            .get_holidays(query.year, &query.country_iso, &query.subdivision_iso)
            .await?;
        tracing::debug!("Found {} holidays", holidays.len());
        Ok(holidays)
    }

    pub async fn save(&self, config: &SavedConfig) -> Result<()> {
        self.store.save_config(config).await
    }

    pub async fn load(&self) -> Result<SavedConfig> {
        self.store.read_config().await
    }

    pub async fn render_preview(&self, session: &mut ConfigSession) -> Result<String> {
        let outcome = match session.plan_request() {
            Ok(request) => self.create_plan(&request).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            session.report(e);
        }
        outcome
    }

    /// Fetches the subdivisions of the session's country into the session.
    pub async fn refresh_subdivisions(&self, session: &mut ConfigSession) -> Result<usize> {
        let Some(country) = session.country().map(str::to_owned) else {
            return Ok(0);
        };
        let outcome = match self.subdivisions(&country).await {
            Ok(subdivisions) => {
                let count = subdivisions.len();
                session
                    .apply(SessionCommand::SetSubdivisions(subdivisions))
                    .map(|_| count)
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            session.report(e);
        }
        outcome
    }

    /// Merges the public holidays for the session's year and region.
    pub async fn import_holidays(&self, session: &mut ConfigSession) -> Result<usize> {
        let outcome = match session.holiday_query() {
            Ok(query) => match self.holidays(&query).await {
                Ok(holidays) => {
                    let count = holidays.len();
                    session
                        .apply(SessionCommand::MergeHolidays(holidays))
                        .map(|_| count)
                }
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            session.report(e);
        }
        outcome
    }

    /// Stores the session's configuration. Returns `Ok(false)` when the user
    /// did not pick a file.
    pub async fn save_session(&self, session: &mut ConfigSession) -> Result<bool> {
        match self.save(&session.saved_config()).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_cancellation() => {
                tracing::debug!("Save skipped, no file chosen");
                Ok(false)
            }
            Err(e) => {
                session.report(&e);
                Err(e)
            }
        }
    }

    /// Loads a stored configuration into the session. Returns `Ok(false)`
    /// when the user did not pick a file.
    pub async fn load_session(&self, session: &mut ConfigSession) -> Result<bool> {
        let outcome = match self.load().await {
            Ok(saved) => session.apply(SessionCommand::LoadConfig(saved)).map(|_| true),
            Err(e) if e.is_cancellation() => return Ok(false),
            Err(e) => Err(e),
        };
        if let Err(e) = &outcome {
            session.report(e);
        }
        outcome
    }
}
