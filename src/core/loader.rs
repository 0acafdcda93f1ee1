use crate::config::{Config, SourceKind};
use crate::errors::{AppError, AppResult};
use crate::models::WorkingTime;
use crate::service::{Resolver, WORKING_TIME, WorkingTimeService};
use crate::source::{DataSource, JsonFileSource, SqliteSource};
use crate::utils::path::expand_tilde;
use std::sync::Arc;

/// Where a command should read working times from; CLI flags take
/// precedence over the configuration.
#[derive(Debug, Clone, Default)]
pub struct SourceSelection {
    pub kind: Option<SourceKind>,
    pub file: Option<String>,
}

pub struct LoaderLogic;

impl LoaderLogic {
    pub fn build_service(
        cfg: &Config,
        selection: &SourceSelection,
    ) -> AppResult<WorkingTimeService> {
        let kind = selection.kind.unwrap_or(cfg.source);

        let source: Arc<dyn DataSource<WorkingTime>> = match kind {
            SourceKind::Sqlite => Arc::new(SqliteSource::new(cfg.database.clone())),
            SourceKind::Json => {
                let file = selection
                    .file
                    .clone()
                    .or_else(|| cfg.json_file.clone())
                    .ok_or_else(|| {
                        AppError::Config(
                            "json source needs --from or `json_file` in the configuration".into(),
                        )
                    })?;
                Arc::new(JsonFileSource::<WorkingTime>::new(expand_tilde(&file)))
            }
        };

        Ok(WorkingTimeService::new(WORKING_TIME, source, cfg.load_timeout()))
    }

    /// Resolves the collection and returns its snapshot.
    pub async fn load(service: &WorkingTimeService) -> AppResult<Vec<WorkingTime>> {
        Resolver::new(service).resolve().await?;
        Ok(service.get_all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_selection_overrides_configured_source() {
        let cfg = Config {
            database: "/tmp/wt.sqlite".into(),
            ..Config::default()
        };

        let sqlite = LoaderLogic::build_service(&cfg, &SourceSelection::default()).unwrap();
        assert_eq!(sqlite.origin(), "sqlite:/tmp/wt.sqlite");

        let json = LoaderLogic::build_service(
            &cfg,
            &SourceSelection {
                kind: Some(SourceKind::Json),
                file: Some("/tmp/wt.json".into()),
            },
        )
        .unwrap();
        assert_eq!(json.origin(), "json:/tmp/wt.json");
        assert_eq!(json.entity_name(), WORKING_TIME);
    }

    #[test]
    fn json_source_without_file_is_a_config_error() {
        let selection = SourceSelection {
            kind: Some(SourceKind::Json),
            file: None,
        };
        let err = LoaderLogic::build_service(&Config::default(), &selection).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
