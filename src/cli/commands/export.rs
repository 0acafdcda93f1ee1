use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::core::loader::{LoaderLogic, SourceSelection};
use crate::errors::AppResult;
use crate::utils::range::DateRange;

pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
        source,
    } = cmd
    {
        let range = range.as_deref().map(str::parse::<DateRange>).transpose()?;

        let service = LoaderLogic::build_service(cfg, &SourceSelection::from(source))?;
        let records = LoaderLogic::load(&service).await?;

        let count = ExportLogic::export(&records, *format, file, range.as_ref(), *force)?;
        if count > 0 {
            ExportLogic::log_export(&cfg.database, *format, file, count);
        }
    }
    Ok(())
}
