/*
[INPUT]:  Parsed subcommand arguments and the wired App
[OUTPUT]: One page action per invocation, printed to stdout
[POS]:    CLI one-shot flows
[UPDATE]: When page controllers or subcommands change
*/

use anyhow::{Result, bail};
use console::style;
use dialoguer::{Password, theme::ColorfulTheme};

use cloudtask::app::{DashboardPage, Route};
use cloudtask::App;

pub async fn run_register(app: &mut App, email: String, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let mut page = app.register_page();
    page.set_email(email.clone());
    page.set_password(password);

    let redirect = page.submit().await;
    let message = page.message().unwrap_or_default().to_string();

    match redirect {
        Some(redirect) => {
            println!("{}", style(&message).green());
            redirect.follow(app.navigator_mut()).await;
            println!("Next: cloudtask login --email {email}");
            Ok(())
        }
        None => bail!(message),
    }
}

pub async fn run_login(app: &mut App, email: String, password: Option<String>) -> Result<()> {
    let password = password_or_prompt(password)?;
    let mut page = app.login_page();
    page.set_email(email);
    page.set_password(password);

    page.submit(app.navigator_mut()).await;

    if app.route() == Route::Dashboard {
        println!("{} {}", style("Logged in as").green(), page.email());
        Ok(())
    } else {
        bail!(page.error().unwrap_or("Login failed").to_string())
    }
}

pub async fn run_logout(app: &mut App) -> Result<()> {
    let mut page = app.dashboard_page();
    page.logout(app.navigator_mut()).await;
    println!("Logged out");
    Ok(())
}

pub async fn run_tasks_list(app: &mut App) -> Result<()> {
    let mut page = app.dashboard_page();
    page.enter(app.navigator_mut()).await;
    finish_dashboard(app, &page)
}

pub async fn run_tasks_add(app: &mut App, title: String) -> Result<()> {
    let mut page = app.dashboard_page();
    page.set_input(title);
    page.create_task(app.navigator_mut()).await;
    finish_dashboard(app, &page)
}

pub async fn run_health(app: &App) -> Result<()> {
    let health = app.gateway().client().health().await?;
    if !health.is_healthy() {
        bail!("backend reports status {}", health.status);
    }
    println!("{} {} ({})", style("ok").green(), health.service, app.gateway().client().base_url());
    Ok(())
}

fn finish_dashboard(app: &App, page: &DashboardPage) -> Result<()> {
    if app.route() == Route::Login {
        bail!("Not logged in or session expired; run `cloudtask login`");
    }
    if let Some(notice) = page.notice() {
        bail!(notice.to_string());
    }
    print_tasks(page);
    Ok(())
}

pub fn print_tasks(page: &DashboardPage) {
    let rows = page.rows();
    if rows.is_empty() {
        println!("{}", style("No tasks yet.").dim());
        return;
    }
    for row in rows {
        println!("{:>4}  {}", style(row.key.to_string()).dim(), row.title);
    }
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?),
    }
}
