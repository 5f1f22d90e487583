use crate::domain::model::User;
use crate::utils::error::Result;
use std::collections::HashMap;

/// Persistence port for the user accounts. Loaded in full at startup,
/// rewritten in full on every save.
pub trait UserStore {
    fn load(&self) -> Result<HashMap<String, User>>;
    fn save(&self, users: &HashMap<String, User>) -> Result<()>;
}

pub trait ConfigProvider {
    fn store_path(&self) -> &str;
    fn salon_name(&self) -> &str;
}
