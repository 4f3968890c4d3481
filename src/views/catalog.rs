use crate::errors::ApiError;
use crate::schema::Course;
use crate::session::{Role, SessionStore};

// pure title filter, order preserved, no state of its own
pub fn filter(catalog: &[Course], query: &str) -> Vec<Course> {
    let needle = query.to_lowercase();

    catalog.iter()
        .filter(|course| course.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[derive(Debug)]
pub enum CatalogState{
    Loading,
    Loaded{
        snapshot: Vec<Course>,
        filtered: Vec<Course>,
    },
    Failed(String),
}

pub struct CatalogView{
    state: CatalogState,
    query: String,
    can_purchase: bool,
}

impl CatalogView {
    // the purchase gate is evaluated once, here, and stays as it was
    pub fn mount(store: &SessionStore) -> Self {
        CatalogView {
            state: CatalogState::Loading,
            query: String::new(),
            can_purchase: store.session(Role::User).authorized(Role::User),
        }
    }

    // applied exactly once per mount, when the fetch completes
    pub fn on_courses(&mut self, result: Result<Vec<Course>, ApiError>) {
        if !matches!(self.state, CatalogState::Loading){
            return;
        }

        self.state = match result {
            Ok(snapshot) => {
                let filtered = filter(&snapshot, &self.query);
                CatalogState::Loaded { snapshot, filtered }
            }
            Err(e) => CatalogState::Failed(e.to_string()),
        };
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();

        if let CatalogState::Loaded { snapshot, filtered } = &mut self.state {
            *filtered = filter(snapshot, query);
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn visible(&self) -> &[Course] {
        match &self.state {
            CatalogState::Loaded { filtered, .. } => filtered,
            _ => &[],
        }
    }

    pub fn purchase_enabled(&self) -> bool {
        self.can_purchase
    }

    // Empty is presentational: zero courses and zero matches share the
    // state and differ only in wording
    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.state {
            CatalogState::Loaded { snapshot, .. } if snapshot.is_empty() => {
                Some("No courses available yet.")
            }
            CatalogState::Loaded { filtered, .. } if filtered.is_empty() => {
                Some("No courses match your search.")
            }
            _ => None,
        }
    }
}
