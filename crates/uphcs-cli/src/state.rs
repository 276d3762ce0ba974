use std::path::PathBuf;

use jiff::Timestamp;
use jiff::civil::Date;
use uphcs_cli::config::{self, API_URL_ENV, CliConfig};
use uphcs_client::ApiClient;
use uphcs_core::models::clinic::Clinic;
use uphcs_core::models::user::User;
use uphcs_session::clinic::ClinicContext;
use uphcs_session::jwt::check_token;
use uphcs_session::routing::{RouteDecision, resolve};

/// Config plus an API client built from it. The clinic selection is saved
/// back to disk whenever it changes.
pub struct AppContext {
    config_path: PathBuf,
    pub config: CliConfig,
    pub client: ApiClient,
}

/// A signed-in user and the clinic they are operating against.
pub struct Session {
    pub user: User,
    pub clinics: ClinicContext,
}

impl Session {
    pub fn clinic(&self) -> eyre::Result<&Clinic> {
        Ok(self.clinics.require_selected()?)
    }

    /// Fail unless the user's role may visit `route`.
    pub fn require_route(&self, route: &str) -> eyre::Result<()> {
        match resolve(Some(&self.user), route) {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Redirect(home) => Err(eyre::eyre!(
                "{} users cannot open {route} (home is {home})",
                self.user.role
            )),
        }
    }
}

impl AppContext {
    pub fn load(config_path: Option<PathBuf>) -> eyre::Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => config::default_path()?,
        };
        let config = config::load_or_default(&config_path)?;
        let env_url = std::env::var(API_URL_ENV).ok();
        let base_url = config.effective_base_url(env_url.as_deref());
        let client = ApiClient::new(&base_url)?.with_token(config.token.clone());
        tracing::debug!(%base_url, config = %config_path.display(), "context loaded");
        Ok(Self {
            config_path,
            config,
            client,
        })
    }

    pub fn save(&self) -> eyre::Result<()> {
        config::save_config(&self.config_path, &self.config)
    }

    pub fn today() -> Date {
        jiff::Zoned::now().date()
    }

    /// Check the stored token and fetch the user it belongs to.
    pub async fn session(&mut self) -> eyre::Result<Session> {
        let token = self.config.token.as_deref().unwrap_or_default();
        let claims = match check_token(token, Timestamp::now()) {
            Ok(claims) => claims,
            Err(e) => {
                return Err(eyre::eyre!("{e}; run `uphcs login` first"));
            }
        };
        let user = self.client.current_user(claims.id).await?;
        let clinics = ClinicContext::initialize(&user, self.config.selected_clinic.as_ref());

        let selected = clinics.selected().cloned();
        if selected != self.config.selected_clinic {
            self.config.selected_clinic = selected;
            self.save()?;
        }
        Ok(Session { user, clinics })
    }

    pub fn select_clinic(&mut self, session: &mut Session, clinic_id: i64) -> eyre::Result<Clinic> {
        let clinic = session.clinics.select(clinic_id)?.clone();
        self.config.selected_clinic = Some(clinic.clone());
        self.save()?;
        Ok(clinic)
    }
}
