use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::api::CatalogService;
use crate::session::{Role, SessionStore};
use crate::views::admin::{AdminShell, AdminTab, CourseListState};
use crate::views::catalog::{CatalogState, CatalogView};

const HELP: &str = "\
commands:
  courses                         browse the catalog
  search <text>                   filter the open catalog by title
  login <admin|user> <email> <password>
  logout                          log the user out
  admin                           open the admin panel
  tab <dashboard|create|courses>  switch admin tab
  set <title|description|price|image> <value>
  submit                          create the course
  admin logout                    log the admin out
  quit";

enum View{
    Root,
    Catalog(CatalogView),
    Admin(AdminShell),
}

pub enum Outcome{
    Continue,
    Quit,
}

pub struct Shell{
    api: CatalogService,
    store: SessionStore,
    view: View,
    last_notice: Option<String>,
}

impl Shell {
    pub fn new(api: CatalogService, store: SessionStore) -> Self {
        Shell {
            api,
            store,
            view: View::Root,
            last_notice: None,
        }
    }

    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        println!("{}", HELP);

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break,
            };

            if let Outcome::Quit = self.handle_line(&line).await {
                break;
            }
        }

        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        debug!(command = line, "handling shell command");

        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match (command, rest) {
            ("", _) => {}
            ("help", _) => println!("{}", HELP),
            ("quit", _) | ("exit", _) => return Outcome::Quit,
            ("courses", _) => self.open_catalog().await,
            ("search", query) => self.search(query),
            ("login", args) => self.login(args).await,
            ("logout", _) => self.logout_user().await,
            ("admin", "logout") => self.logout_admin(),
            ("admin", "") => self.open_admin(),
            ("tab", name) => self.select_tab(name).await,
            ("set", args) => self.set_field(args),
            ("submit", _) => self.submit().await,
            _ => self.notify(format!("unknown command: {} (try 'help')", command)),
        }

        Outcome::Continue
    }

    async fn open_catalog(&mut self) {
        let mut view = CatalogView::mount(&self.store);
        view.on_courses(self.api.list_courses(&self.store).await);

        if matches!(view.state(), CatalogState::Failed(_)){
            self.notify(String::from("Failed to load courses"));
        }

        self.view = View::Catalog(view);
        self.render();
    }

    fn search(&mut self, query: &str) {
        match &mut self.view {
            View::Catalog(view) => {
                view.set_query(query);
                self.render();
            }
            _ => self.notify(String::from("open the catalog first with 'courses'")),
        }
    }

    async fn login(&mut self, args: &str) {
        let parts: Vec<&str> = args.split_whitespace().collect();

        let (role, email, password) = match parts.as_slice() {
            ["admin", email, password] => (Role::Admin, *email, *password),
            ["user", email, password] => (Role::User, *email, *password),
            _ => return self.notify(String::from("usage: login <admin|user> <email> <password>")),
        };

        match self.api.login(role, email, password).await {
            Ok(record) => {
                if self.store.set(role, record).is_err(){
                    return self.notify(String::from("Cant write the session file"));
                }
                self.notify(format!("Logged in as {}", role.as_str()));
            }
            Err(e) => self.notify(format!("Login failed: {}", e)),
        }
    }

    // the credential goes away and we land on the root view whatever
    // the server or the network had to say about it
    async fn logout_user(&mut self) {
        match self.api.logout(&self.store).await {
            Ok(()) => self.notify(String::from("Logout successful!")),
            Err(e) => self.notify(format!("Logout failed: {}", e)),
        }

        let _ = self.store.clear(Role::User);
        self.view = View::Root;
    }

    fn logout_admin(&mut self) {
        let _ = self.store.clear(Role::Admin);
        self.view = View::Root;
        self.notify(String::from("Admin logged out"));
    }

    fn open_admin(&mut self) {
        if !self.store.session(Role::Admin).authorized(Role::Admin){
            return self.notify(String::from("Admin login required"));
        }

        self.view = View::Admin(AdminShell::mount());
        self.render();
    }

    async fn select_tab(&mut self, name: &str) {
        let Some(tab) = AdminTab::parse(name) else {
            return self.notify(format!("no such tab: {}", name));
        };

        let wants_fetch = match &mut self.view {
            View::Admin(shell) => shell.select_tab(tab),
            _ => return self.notify(String::from("open the admin panel first with 'admin'")),
        };

        if wants_fetch{
            let result = self.api.list_courses(&self.store).await;
            if let View::Admin(shell) = &mut self.view {
                shell.on_courses(result);
            }
        }

        self.render();
    }

    fn set_field(&mut self, args: &str) {
        let Some((field, value)) = args.split_once(' ') else {
            return self.notify(String::from("usage: set <field> <value>"));
        };
        let value = value.trim();

        let View::Admin(shell) = &mut self.view else {
            return self.notify(String::from("open the admin panel first with 'admin'"));
        };

        match field {
            "title" => shell.form.title = value.to_string(),
            "description" => shell.form.description = value.to_string(),
            "price" => shell.form.price = value.to_string(),
            "image" => shell.form.image = Some(value.into()),
            _ => return self.notify(format!("no such field: {}", field)),
        }
    }

    async fn submit(&mut self) {
        let draft = match &mut self.view {
            View::Admin(shell) => shell.form.begin_submit(),
            _ => return self.notify(String::from("open the admin panel first with 'admin'")),
        };

        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => return self.notify(format!("{}", e)),
        };

        let result = self.api.create_course(&self.store, draft).await;

        if let View::Admin(shell) = &mut self.view {
            shell.form.finish_submit(&result);
        }

        match result {
            Ok(course) => self.notify(format!("Course created successfully! ({})", course.title)),
            Err(e) => self.notify(format!("{}", e)),
        }
    }

    fn render(&self) {
        match &self.view {
            View::Root => println!("(root) type 'courses' or 'admin'"),
            View::Catalog(view) => render_catalog(view),
            View::Admin(shell) => render_admin(shell),
        }
    }

    fn notify(&mut self, message: String) {
        println!("{}", message);
        self.last_notice = Some(message);
    }

    #[cfg(test)]
    fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    #[cfg(test)]
    fn store(&self) -> &SessionStore {
        &self.store
    }

    #[cfg(test)]
    fn at_root(&self) -> bool {
        matches!(self.view, View::Root)
    }
}

fn render_catalog(view: &CatalogView) {
    match view.state() {
        CatalogState::Loading => println!("Loading courses..."),
        CatalogState::Failed(message) => println!("Failed to load courses: {}", message),
        CatalogState::Loaded { .. } => {
            if let Some(message) = view.empty_message(){
                println!("{}", message);
                return;
            }

            for course in view.visible() {
                let affordance = if view.purchase_enabled() { "[buy]" } else { "[login to buy]" };
                println!("{} - ₹{}  {}  ({})", course.title, course.price, affordance, course.image_url());
                if !course.description.is_empty(){
                    println!("    {}", course.description);
                }
            }
        }
    }
}

fn render_admin(shell: &AdminShell) {
    match shell.tab() {
        AdminTab::Dashboard => {
            println!("Admin Dashboard");
            println!("Welcome to the admin dashboard. Here you can manage courses, view statistics, and more.");
        }
        AdminTab::Create => {
            let form = &shell.form;
            println!("Create New Course");
            println!("  title:       {}", form.title);
            println!("  description: {}", form.description);
            println!("  price:       {}", form.price);
            match &form.image {
                Some(path) => println!("  image:       {}", path.display()),
                None => println!("  image:       (no file)"),
            }
        }
        AdminTab::Courses => match shell.courses() {
            CourseListState::Loading => println!("Loading courses..."),
            CourseListState::Failed(message) => println!("Failed to load courses: {}", message),
            CourseListState::Loaded(courses) => {
                if courses.is_empty(){
                    println!("No courses available yet.");
                    return;
                }
                for course in courses {
                    println!("{} - ₹{}", course.title, course.price);
                }
            }
        },
    }
}
