use crate::{
    libs::{
        config::{Config, CONFIG_FILE_NAME},
        data_storage::DataStorage,
        messages::Message,
    },
    msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::init()?;
    config.save()?;

    let path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
    msg_success!(Message::ConfigSaved(path.display().to_string()));
    Ok(())
}
