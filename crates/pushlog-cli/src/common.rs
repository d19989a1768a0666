use pushlog_core::storage::data_dir;
use pushlog_core::{Config, Store, Tracker};

/// Open the store in the data directory, restore from the mirror, and wrap
/// it in a tracker -- the startup sequence every command shares. Takes the
/// already-loaded config so commands read it exactly once.
pub fn open_tracker(config: &Config) -> Result<Tracker, Box<dyn std::error::Error>> {
    let mut store = if config.mirror_enabled {
        Store::open()?
    } else {
        Store::open_at(data_dir()?.join("pushlog.db"), None)?
    };
    store.restore_from_mirror();
    Ok(Tracker::new(store))
}
