//! Creates an administrator account.
//!
//! `create_superuser --email admin@example.com --name Admin --password ...`
//! Every flag can also come from `SUPERUSER_EMAIL`, `SUPERUSER_NAME` and
//! `SUPERUSER_PASSWORD`.

use anyhow::Context;
use clap::{Arg, Command};
use dotenvy::dotenv;

use social_api::application::use_cases::users::create_superuser::CreateSuperuser;
use social_api::bootstrap::config::Config;
use social_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository;

fn command() -> Command {
    Command::new("create_superuser")
        .about("Create a staff user with every permission")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("email")
                .long("email")
                .help("Login email address")
                .env("SUPERUSER_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .help("Display name")
                .env("SUPERUSER_NAME")
                .default_value("Admin"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Account password")
                .env("SUPERUSER_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "social_api=info".into()),
        )
        .init();

    let matches = command().get_matches();
    let email = matches
        .get_one::<String>("email")
        .context("missing required argument: --email")?;
    let name = matches
        .get_one::<String>("name")
        .map(String::as_str)
        .unwrap_or("Admin");
    let password = matches
        .get_one::<String>("password")
        .context("missing required argument: --password")?;

    let cfg = Config::from_env()?;
    let pool =
        social_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.db_max_connections)
            .await?;
    social_api::infrastructure::db::migrate(&pool).await?;

    let repo = SqlxUserRepository::new(pool);
    let uc = CreateSuperuser { repo: &repo };
    let user = uc.execute(email, name, password).await?;
    tracing::info!(user_id = user.id, email = %user.email, "superuser_created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let matches = command()
            .try_get_matches_from([
                "create_superuser",
                "--email",
                "root@example.com",
                "--password",
                "pw",
            ])
            .unwrap();
        assert_eq!(matches.get_one::<String>("email").unwrap(), "root@example.com");
        assert_eq!(matches.get_one::<String>("name").unwrap(), "Admin");
    }
}
