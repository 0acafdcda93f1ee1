use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let removed = DeleteLogic::apply(&mut pool, *id)?;

        success(format!(
            "Working time #{} ({} {} → {}) has been deleted.",
            removed.id,
            removed.date_str(),
            removed.start_str(),
            removed.end_str()
        ));
    }

    Ok(())
}
