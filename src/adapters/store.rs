use crate::domain::model::User;
use crate::domain::ports::UserStore;
use crate::utils::error::{Result, SalonError};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Flat-file user store: one line per user, three space-separated fields
/// (`username password loyaltyPoints`). The writer emits exactly one
/// space between fields; the reader expects the same.
#[derive(Debug, Clone)]
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserStore for FileUserStore {
    fn load(&self) -> Result<HashMap<String, User>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // No store yet means no users yet, not an error.
                tracing::debug!("No user store at {}, starting empty", self.path.display());
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .from_reader(BufReader::new(file));

        let mut users = HashMap::new();
        for (line, record) in reader.deserialize::<User>().enumerate() {
            let user = record.map_err(|e| SalonError::StoreFormatError {
                line: line + 1,
                message: e.to_string(),
            })?;
            match users.entry(user.username.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(user);
                }
                Entry::Occupied(_) => {
                    tracing::warn!(
                        "Duplicate username '{}' at line {}, keeping the first entry",
                        user.username,
                        line + 1
                    );
                }
            }
        }
        Ok(users)
    }

    fn save(&self, users: &HashMap<String, User>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .from_writer(File::create(&self.path)?);

        let mut users: Vec<&User> = users.values().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        for user in users {
            writer.serialize(user)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions. Clones share the
/// same map, so a test can keep a handle and inspect what was saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Rc<RefCell<HashMap<String, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: HashMap<String, User>) -> Self {
        Self {
            users: Rc::new(RefCell::new(users)),
        }
    }

    /// The users as of the last save (or seeding).
    pub fn snapshot(&self) -> HashMap<String, User> {
        self.users.borrow().clone()
    }
}

impl UserStore for MemoryUserStore {
    fn load(&self) -> Result<HashMap<String, User>> {
        Ok(self.users.borrow().clone())
    }

    fn save(&self, users: &HashMap<String, User>) -> Result<()> {
        *self.users.borrow_mut() = users.clone();
        Ok(())
    }
}
