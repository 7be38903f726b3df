use agora_storage::Storage;
use anyhow::Result;

use crate::{ensure_db_dir, get_db_path};

pub(crate) fn run() -> Result<()> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    let storage = Storage::new(&db_path)?;
    let stats = storage.get_stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
