//! Run settings resolved from CLI flags and optional config/rules files

use anyhow::{bail, Result};
use cineprog_core::{ProgramConfig, RuleSet};

/// Rules from an explicit file, or none. A named file that cannot be read
/// or parsed is an error, never an empty rule set.
pub fn load_rules(path: Option<&str>) -> Result<RuleSet> {
    match path {
        Some(p) => RuleSet::load_from_file(p),
        None => Ok(RuleSet::default()),
    }
}

/// Config from an explicit file (which must carry `year`) or the built-in
/// tables. `--year` overrides the file; without either there is no target
/// year and the run is refused.
pub fn load_config(path: Option<&str>, year: Option<i32>) -> Result<ProgramConfig> {
    let mut config = match (path, year) {
        (Some(p), _) => ProgramConfig::load_from_file(p)?,
        (None, Some(year)) => ProgramConfig::for_year(year),
        (None, None) => bail!("No target year: pass --year or a config file with `year`"),
    };
    if let Some(year) = year {
        config.year = year;
    }
    Ok(config)
}
