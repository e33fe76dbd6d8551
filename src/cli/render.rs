use anstyle::{AnsiColor, Color, Effects, Style};

use email_learning_admin::{
    api::{Course, ImapConnection, ImapConnectionId, Organization, OrganizationId},
    navigation::{MenuEntry, Page},
};

const HEADER: Style = Style::new().effects(Effects::BOLD);
const SUBTLE: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)));
const PROBLEM: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

fn header(columns: &str) {
    println!("{HEADER}{columns}{HEADER:#}");
}

fn mark(active: bool) -> &'static str {
    if active { "*" } else { " " }
}

pub fn courses(courses: &[Course]) {
    if courses.is_empty() {
        println!("{SUBTLE}no courses{SUBTLE:#}");
        return;
    }
    header(&format!("{:>6}  {:<8}  {:<24}  {}", "ID", "STATUS", "SLUG", "TITLE"));
    for course in courses {
        println!(
            "{:>6}  {:<8}  {:<24}  {}",
            course.id,
            if course.enabled { "enabled" } else { "disabled" },
            course.slug,
            course.title
        );
    }
}

pub fn course(course: &Course) {
    println!("{HEADER}{}{HEADER:#} ({})", course.title, course.slug);
    println!("  id:              {}", course.id);
    println!("  enabled:         {}", course.enabled);
    match course.imap_connection_id {
        Some(connection) => println!("  imap connection: {connection}"),
        None => println!("  imap connection: {SUBTLE}none{SUBTLE:#}"),
    }
    if !course.description.is_empty() {
        println!();
        println!("{}", course.description);
    }
}

pub fn organizations(organizations: &[Organization], active: Option<OrganizationId>) {
    header(&format!("  {:>6}  {:<24}  {}", "ID", "NAME", "DESCRIPTION"));
    for organization in organizations {
        println!(
            "{} {:>6}  {:<24}  {}",
            mark(active == Some(organization.id)),
            organization.id,
            organization.name,
            organization.description.as_deref().unwrap_or_default()
        );
    }
}

pub fn imap_connections(connections: &[ImapConnection], selected: Option<ImapConnectionId>) {
    if connections.is_empty() {
        println!("{SUBTLE}no imap connections, create one with `imap create`{SUBTLE:#}");
        return;
    }
    header(&format!("  {:>6}  {:<32}  {}", "ID", "EMAIL", "SERVER"));
    for connection in connections {
        let server = match (&connection.server, connection.port) {
            (Some(server), Some(port)) => format!("{server}:{port}"),
            (Some(server), None) => server.clone(),
            (None, _) => String::new(),
        };
        println!(
            "{} {:>6}  {:<32}  {server}",
            mark(selected == Some(connection.id)),
            connection.id,
            connection.email
        );
    }
}

pub fn menu(entries: &[MenuEntry]) {
    for entry in entries {
        println!("{:<20} {SUBTLE}{}{SUBTLE:#}", entry.page.label(), entry.href);
    }
}

pub fn placeholder(page: Page) {
    if let Some(body) = page.placeholder() {
        println!("{HEADER}{}{HEADER:#}", page.label());
        println!("{body}");
    }
}

/// Field and banner messages of a rejected form, on stderr.
pub fn problems<'a>(messages: impl IntoIterator<Item = Option<&'a str>>) {
    for message in messages.into_iter().flatten() {
        eprintln!("{PROBLEM}{message}{PROBLEM:#}");
    }
}
