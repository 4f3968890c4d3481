use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::schema::CredentialRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role{
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

// the one session type every gated affordance checks against
#[derive(Debug, Clone, PartialEq)]
pub enum Session{
    Anonymous,
    Authenticated{
        role: Role,
        token: String,
    },
}

impl Session {
    pub fn authorized(&self, required: Role) -> bool {
        match self {
            Session::Authenticated { role, .. } => *role == required,
            Session::Anonymous => false,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token),
            Session::Anonymous => None,
        }
    }
}

// on-disk shape: one optional record per role, same keys the browser
// client used in localStorage
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile{
    admin: Option<CredentialRecord>,
    user: Option<CredentialRecord>,
}

pub struct SessionStore{
    path: PathBuf,
    records: SessionFile,
}

impl SessionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        // an absent file is the same as nobody ever having logged in
        let records = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|_e| AppError::SessionRead)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => SessionFile::default(),
            Err(_e) => return Err(AppError::SessionRead),
        };

        Ok(SessionStore { path, records })
    }

    pub fn get(&self, role: Role) -> Option<&CredentialRecord> {
        match role {
            Role::Admin => self.records.admin.as_ref(),
            Role::User => self.records.user.as_ref(),
        }
    }

    pub fn set(&mut self, role: Role, record: CredentialRecord) -> Result<(), AppError> {
        match role {
            Role::Admin => self.records.admin = Some(record),
            Role::User => self.records.user = Some(record),
        }
        self.persist()
    }

    pub fn clear(&mut self, role: Role) -> Result<(), AppError> {
        match role {
            Role::Admin => self.records.admin = None,
            Role::User => self.records.user = None,
        }
        self.persist()
    }

    pub fn session(&self, role: Role) -> Session {
        match self.get(role) {
            Some(record) => Session::Authenticated { role, token: record.token.clone() },
            None => Session::Anonymous,
        }
    }

    fn persist(&self) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(&self.records).map_err(|_e| AppError::SessionWrite)?;
        fs::write(&self.path, bytes).map_err(|_e| AppError::SessionWrite)
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("session.json")).unwrap()
    }

    #[test]
    fn test_absent_file_means_logged_out(){
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.get(Role::Admin).is_none());
        assert!(store.get(Role::User).is_none());
        assert_eq!(store.session(Role::User), Session::Anonymous);
    }

    #[test]
    fn test_records_survive_a_reopen(){
        let dir = tempfile::tempdir().unwrap();

        // 1. Log the admin in and drop the store
        {
            let mut store = store_in(&dir);
            store.set(Role::Admin, CredentialRecord::new("admin.jwt")).unwrap();
        }

        // 2. A fresh open sees the same record, user still absent
        let store = store_in(&dir);
        assert_eq!(store.get(Role::Admin).unwrap().token, "admin.jwt");
        assert!(store.get(Role::User).is_none());
    }

    #[test]
    fn test_roles_are_independent(){
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.set(Role::Admin, CredentialRecord::new("a")).unwrap();
        store.set(Role::User, CredentialRecord::new("u")).unwrap();
        store.clear(Role::Admin).unwrap();

        assert!(store.get(Role::Admin).is_none());
        assert_eq!(store.get(Role::User).unwrap().token, "u");
    }

    #[test]
    fn test_cleared_is_indistinguishable_from_never_logged_in(){
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.set(Role::User, CredentialRecord::new("u")).unwrap();
        store.clear(Role::User).unwrap();

        assert_eq!(store.session(Role::User), Session::Anonymous);
    }

    #[test]
    fn test_authorized_checks_the_exact_role(){
        let session = Session::Authenticated { role: Role::User, token: "u".to_string() };

        assert!(session.authorized(Role::User));
        assert!(!session.authorized(Role::Admin));
        assert!(!Session::Anonymous.authorized(Role::User));
    }
}
