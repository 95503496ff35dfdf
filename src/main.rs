use app::{AppHelper, AuthorsCommand, Command, DisjointCommand, RelationsCommand, SubsetsCommand};

mod app;

fn main() {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Builds and queries relation indices of argumentation frameworks.",
    );
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(RelationsCommand::new()),
        Box::new(DisjointCommand::new()),
        Box::new(SubsetsCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app.launch_app();
}
