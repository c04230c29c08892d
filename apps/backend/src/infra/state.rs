use crate::error::AppError;
use crate::infra::db::{connect_db, connect_url, run_migrations, DbProfile};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for AppState instances, used by both main and tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    db_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            db_url: None,
        }
    }

    /// Connect via DATABASE_URL under the given profile.
    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    /// Connect to an explicit URL, bypassing the environment (tests).
    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    /// Single entrypoint: connect + migrate when a database was requested.
    pub async fn build(self) -> Result<AppState, AppError> {
        let conn = match (self.db_url, self.db_profile) {
            (Some(url), _) => Some(connect_url(&url).await?),
            (None, Some(profile)) => Some(connect_db(profile).await?),
            (None, None) => None,
        };

        match conn {
            Some(conn) => {
                run_migrations(&conn).await?;
                Ok(AppState::new(conn, self.security_config))
            }
            None => Ok(AppState::without_db(self.security_config)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::build_state;

    #[tokio::test]
    async fn build_succeeds_without_db_option() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn build_connects_and_migrates_in_memory_sqlite() {
        let state = build_state()
            .with_db_url("sqlite::memory:")
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
    }
}
