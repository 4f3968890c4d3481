use std::path::PathBuf;

use crate::errors::ApiError;
use crate::schema::{Course, CourseDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminTab{
    Dashboard,
    Create,
    Courses,
}

impl AdminTab {
    pub fn parse(name: &str) -> Option<AdminTab> {
        match name {
            "dashboard" => Some(AdminTab::Dashboard),
            "create" => Some(AdminTab::Create),
            "courses" => Some(AdminTab::Courses),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct CourseForm{
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: Option<PathBuf>,
    in_flight: bool,
}

impl CourseForm {
    // local pre-check, mirrors but does not replace server validation
    pub fn validate(&self) -> Result<CourseDraft, ApiError> {
        if self.title.trim().is_empty(){
            return Err(ApiError::MissingField("title"));
        }
        if self.description.trim().is_empty(){
            return Err(ApiError::MissingField("description"));
        }
        if self.price.trim().is_empty(){
            return Err(ApiError::MissingField("price"));
        }

        let image = match &self.image {
            Some(path) => path.clone(),
            None => return Err(ApiError::MissingField("image")),
        };

        Ok(CourseDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            image,
        })
    }

    // refuses while a create request is outstanding
    pub fn begin_submit(&mut self) -> Result<CourseDraft, ApiError> {
        if self.in_flight{
            return Err(ApiError::Busy);
        }

        let draft = self.validate()?;
        self.in_flight = true;
        Ok(draft)
    }

    // on success everything resets, image back to "no file"; on failure
    // the form is left intact for the retry
    pub fn finish_submit(&mut self, result: &Result<Course, ApiError>) {
        self.in_flight = false;

        if result.is_ok(){
            self.title.clear();
            self.description.clear();
            self.price.clear();
            self.image = None;
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

// the courses tab fetches on its own mount, nothing else does
#[derive(Debug)]
pub enum CourseListState{
    Loading,
    Loaded(Vec<Course>),
    Failed(String),
}

pub struct AdminShell{
    tab: AdminTab,
    pub form: CourseForm,
    courses: CourseListState,
}

impl AdminShell {
    pub fn mount() -> Self {
        AdminShell {
            tab: AdminTab::Dashboard,
            form: CourseForm::default(),
            courses: CourseListState::Loading,
        }
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    // pure local transition; entering Courses remounts its list
    pub fn select_tab(&mut self, tab: AdminTab) -> bool {
        self.tab = tab;

        if tab == AdminTab::Courses{
            self.courses = CourseListState::Loading;
            return true;
        }

        false
    }

    pub fn on_courses(&mut self, result: Result<Vec<Course>, ApiError>) {
        self.courses = match result {
            Ok(courses) => CourseListState::Loaded(courses),
            Err(e) => CourseListState::Failed(e.to_string()),
        };
    }

    pub fn courses(&self) -> &CourseListState {
        &self.courses
    }
}

#[cfg(test)]
mod tests{
    use super::*;

    fn filled_form() -> CourseForm {
        CourseForm {
            title: "Intro to Go".to_string(),
            description: "The basics".to_string(),
            price: "4999".to_string(),
            image: Some(PathBuf::from("go.png")),
            in_flight: false,
        }
    }

    fn created_course() -> Course {
        Course {
            id: "662a".to_string(),
            title: "Intro to Go".to_string(),
            description: "The basics".to_string(),
            price: 4999.0,
            image: None,
        }
    }

    #[test]
    fn test_any_missing_field_is_rejected_locally(){
        let mut form = filled_form();
        form.title.clear();
        assert_eq!(form.validate(), Err(ApiError::MissingField("title")));

        let mut form = filled_form();
        form.description = "   ".to_string();
        assert_eq!(form.validate(), Err(ApiError::MissingField("description")));

        let mut form = filled_form();
        form.price.clear();
        assert_eq!(form.validate(), Err(ApiError::MissingField("price")));

        let mut form = filled_form();
        form.image = None;
        assert_eq!(form.validate(), Err(ApiError::MissingField("image")));
    }

    #[test]
    fn test_success_resets_all_four_fields(){
        let mut form = filled_form();
        let _draft = form.begin_submit().unwrap();

        form.finish_submit(&Ok(created_course()));

        assert!(form.title.is_empty());
        assert!(form.description.is_empty());
        assert!(form.price.is_empty());
        assert!(form.image.is_none());
        assert!(!form.in_flight());
    }

    #[test]
    fn test_failure_leaves_the_form_intact(){
        let mut form = filled_form();
        let _draft = form.begin_submit().unwrap();

        form.finish_submit(&Err(ApiError::Server("Course creation failed.".to_string())));

        assert_eq!(form.title, "Intro to Go");
        assert_eq!(form.price, "4999");
        assert_eq!(form.image, Some(PathBuf::from("go.png")));
        assert!(!form.in_flight());
    }

    #[test]
    fn test_resubmission_is_refused_while_in_flight(){
        let mut form = filled_form();
        let _draft = form.begin_submit().unwrap();

        assert_eq!(form.begin_submit().unwrap_err(), ApiError::Busy);
    }

    #[test]
    fn test_tabs_are_mutually_exclusive_and_local(){
        let mut shell = AdminShell::mount();
        assert_eq!(shell.tab(), AdminTab::Dashboard);

        // only the courses tab asks for a fetch on entry
        assert!(!shell.select_tab(AdminTab::Create));
        assert_eq!(shell.tab(), AdminTab::Create);

        assert!(shell.select_tab(AdminTab::Courses));
        assert!(matches!(shell.courses(), CourseListState::Loading));
    }

    #[test]
    fn test_courses_tab_keeps_fetch_outcomes(){
        let mut shell = AdminShell::mount();
        shell.select_tab(AdminTab::Courses);

        shell.on_courses(Err(ApiError::Network("connection refused".to_string())));
        assert!(matches!(shell.courses(), CourseListState::Failed(_)));

        // a remount starts a fresh fetch
        shell.select_tab(AdminTab::Courses);
        assert!(matches!(shell.courses(), CourseListState::Loading));

        shell.on_courses(Ok(vec![created_course()]));
        match shell.courses() {
            CourseListState::Loaded(courses) => assert_eq!(courses.len(), 1),
            other => panic!("expected loaded state, got {:?}", other),
        }
    }
}
