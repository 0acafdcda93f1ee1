use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::loader::{LoaderLogic, SourceSelection};
use crate::errors::AppResult;
use crate::utils::range::DateRange;
use crate::view::{UiState, WorkingTimeView};

/// Resolve the working-time collection, then render it.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        calendar,
        flat,
        period,
        source,
    } = cmd
    {
        // validate the filter before touching the source
        let range = period.as_deref().map(str::parse::<DateRange>).transpose()?;

        let service = LoaderLogic::build_service(cfg, &SourceSelection::from(source))?;
        let mut records = LoaderLogic::load(&service).await?;

        if let Some(r) = range {
            records.retain(|wt| r.contains(&wt.date));
        }

        let ui = UiState {
            working_time_calendar: if *calendar {
                true
            } else if *flat {
                false
            } else {
                cfg.working_time_calendar
            },
        };

        print!("{}", WorkingTimeView::render(&records, &ui));
    }
    Ok(())
}
