/*
[INPUT]:  Stored session and user input via CLI menus
[OUTPUT]: Login/register/dashboard pages driven until the user exits
[POS]:    CLI interactive flow
[UPDATE]: When pages or their actions change
*/

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password, Select, theme::ColorfulTheme};

use cloudtask::App;
use cloudtask::app::Route;

use super::commands::print_tasks;

pub async fn run_interactive(app: &mut App) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("CloudTask").bold().cyan());

    loop {
        let keep_going = match app.route() {
            Route::Login => login_screen(app, &theme).await?,
            Route::Register => register_screen(app, &theme).await?,
            Route::Dashboard => dashboard_screen(app, &theme).await?,
        };
        if !keep_going {
            return Ok(());
        }
    }
}

async fn login_screen(app: &mut App, theme: &ColorfulTheme) -> Result<bool> {
    let actions = vec!["Login", "Register", "Exit"];
    let selection = Select::with_theme(theme)
        .with_prompt("Login")
        .items(&actions)
        .default(0)
        .interact()?;

    match selection {
        0 => {
            let mut page = app.login_page();
            page.set_email(prompt_email(theme)?);
            page.set_password(prompt_password(theme)?);
            page.submit(app.navigator_mut()).await;
            if let Some(error) = page.error() {
                println!("{}", style(error).red());
            }
            Ok(true)
        }
        1 => {
            app.navigator_mut().navigate(Route::Register);
            Ok(true)
        }
        _ => Ok(false),
    }
}

async fn register_screen(app: &mut App, theme: &ColorfulTheme) -> Result<bool> {
    let actions = vec!["Register", "Back to login", "Exit"];
    let selection = Select::with_theme(theme)
        .with_prompt("Register")
        .items(&actions)
        .default(0)
        .interact()?;

    match selection {
        0 => {
            let mut page = app.register_page();
            page.set_email(prompt_email(theme)?);
            page.set_password(prompt_password(theme)?);

            match page.submit().await {
                Some(redirect) => {
                    println!("{}", style(page.message().unwrap_or_default()).green());
                    redirect.follow(app.navigator_mut()).await;
                }
                // stay on the form so the user can retry
                None => println!("{}", style(page.message().unwrap_or_default()).red()),
            }
            Ok(true)
        }
        1 => {
            app.navigator_mut().navigate(Route::Login);
            Ok(true)
        }
        _ => Ok(false),
    }
}

async fn dashboard_screen(app: &mut App, theme: &ColorfulTheme) -> Result<bool> {
    let mut page = app.dashboard_page();
    page.enter(app.navigator_mut()).await;

    while app.route() == Route::Dashboard {
        println!("\n{}", style("Your Tasks").bold());
        print_tasks(&page);
        if let Some(notice) = page.notice() {
            println!("{}", style(notice).yellow());
        }

        let actions = vec!["Add task", "Refresh", "Logout", "Exit"];
        let selection = Select::with_theme(theme)
            .with_prompt("Dashboard")
            .items(&actions)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                let title: String = Input::with_theme(theme)
                    .with_prompt("Enter a new task")
                    .with_initial_text(page.input())
                    .interact_text()?;
                page.set_input(title);
                page.create_task(app.navigator_mut()).await;
            }
            1 => page.fetch_tasks(app.navigator_mut()).await,
            2 => page.logout(app.navigator_mut()).await,
            _ => return Ok(false),
        }
    }

    println!("{}", style("Signed out, please log in.").yellow());
    Ok(true)
}

fn prompt_email(theme: &ColorfulTheme) -> Result<String> {
    Ok(Input::with_theme(theme).with_prompt("Email").interact_text()?)
}

fn prompt_password(theme: &ColorfulTheme) -> Result<String> {
    Ok(Password::with_theme(theme).with_prompt("Password").interact()?)
}
