// crates/tempo-cli/src/commands/query.rs
//
// `tempo params` and `tempo last-block`: read module state from a node's
// RocksDB without taking its write lock.

use tempo_inflation::{InflationKeeper, LastBlockInfo, Params};
use tempo_store::RocksStore;

use crate::output::{format_json, format_table, FieldRow, OutputFormat};

/// Run the params query.
pub fn run_params(data_dir: &str, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data_dir)?;
    let params = InflationKeeper::new(&store).params()?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&params)),
        OutputFormat::Table => {
            println!("{}", format_table(&params_rows(&params)));
            println!();
            println!("{}", format_table(&recipient_rows(&params)));
        }
    }
    Ok(())
}

/// Run the last-block query.
pub fn run_last_block(
    data_dir: &str,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(data_dir)?;
    let info = InflationKeeper::new(&store).last_block_info()?;

    match format {
        OutputFormat::Json => println!("{}", format_json(&info)),
        OutputFormat::Table => println!("{}", format_table(&last_block_rows(&info))),
    }
    Ok(())
}

fn open_store(data_dir: &str) -> Result<RocksStore, Box<dyn std::error::Error>> {
    let path = format!("{}/rocksdb", expand_tilde(data_dir));
    Ok(RocksStore::open_read_only(&path)?)
}

fn params_rows(params: &Params) -> Vec<FieldRow> {
    vec![
        FieldRow::new("min_inflation", params.min_inflation),
        FieldRow::new("max_inflation", params.max_inflation),
        FieldRow::new("min_bonded", params.min_bonded),
        FieldRow::new("max_bonded", params.max_bonded),
        FieldRow::new("inflation_change (per s)", params.inflation_change),
        FieldRow::new("max_block_duration (s)", params.max_block_duration_secs),
    ]
}

fn recipient_rows(params: &Params) -> Vec<FieldRow> {
    params
        .inflation_recipients
        .iter()
        .map(|r| FieldRow::new(&r.address, r.share))
        .collect()
}

fn last_block_rows(info: &LastBlockInfo) -> Vec<FieldRow> {
    vec![
        FieldRow::new("inflation", info.inflation),
        FieldRow::new("time", info.time.to_rfc3339()),
    ]
}

/// Expand `~` at the start of a path to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_rows_cover_every_field() {
        let rows = params_rows(&Params::default());
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].value, "0.07");
        assert_eq!(rows[5].value, "60");
    }

    #[test]
    fn test_recipient_rows() {
        let rows = recipient_rows(&Params::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field, "fee_collector");
        assert_eq!(rows[0].value, "1");
    }

    #[test]
    fn test_expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde("/var/lib/tempo"), "/var/lib/tempo");
    }
}
