//! DomainHub CLI - Command-line interface for a DomainHub server

mod rows;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use domainhub_sdk::{DomainHubClient, DomainInput, NewUser, PostFilter, PublishStatus, Role};
use rows::{DomainRow, PageRow, PostRow, UserRow};
use tabled::{Table, Tabled};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "domainhub")]
#[command(about = "DomainHub CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Server URL
    #[arg(long, global = true, env = "DOMAINHUB_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Login email
    #[arg(long, global = true, env = "DOMAINHUB_EMAIL")]
    email: Option<String>,

    /// Login password
    #[arg(long, global = true, env = "DOMAINHUB_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server status (and database stats when credentials are given)
    Status,

    /// Manage domains
    Domains {
        #[command(subcommand)]
        command: DomainCommands,
    },

    /// Inspect pages
    Pages {
        #[command(subcommand)]
        command: PageCommands,
    },

    /// Inspect blog posts
    Posts {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Manage user accounts (admin)
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Run maintenance now (admin)
    Maintenance {
        /// Also VACUUM the database
        #[arg(long)]
        force_vacuum: bool,
    },
}

#[derive(Subcommand)]
enum DomainCommands {
    /// List all domains
    List,
    /// Create a domain
    Create {
        /// Hostname, e.g. example.com
        name: String,
        /// Display title
        #[arg(short, long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
    },
    /// Delete a domain with all of its content
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum PageCommands {
    /// List the pages of a domain
    List {
        /// Domain ID
        domain_id: i64,
    },
}

#[derive(Subcommand)]
enum PostCommands {
    /// List posts
    List {
        /// Only posts of this domain
        #[arg(long)]
        domain_id: Option<i64>,
        /// Only published posts
        #[arg(long)]
        published: bool,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List accounts
    List,
    /// Create an account
    Create {
        #[arg(value_name = "EMAIL")]
        user_email: String,
        /// Initial password (min. 8 characters)
        #[arg(long)]
        initial_password: String,
        #[arg(long)]
        name: Option<String>,
        /// Grant the admin role
        #[arg(long)]
        admin: bool,
    },
}

impl Cli {
    /// Client with an open session, for endpoints that require one
    async fn login(&self) -> Result<DomainHubClient> {
        let (Some(email), Some(password)) = (&self.email, &self.password) else {
            anyhow::bail!(
                "This command requires credentials: pass --email/--password \
                 or set DOMAINHUB_EMAIL/DOMAINHUB_PASSWORD"
            );
        };
        let client = DomainHubClient::connect(&self.url)?;
        client
            .login(email, password)
            .await
            .context("Login failed")?;
        Ok(client)
    }
}

fn print_table<T: Tabled>(rows: Vec<T>, empty: &str) {
    if rows.is_empty() {
        println!("{}", empty.yellow());
    } else {
        println!("{}", Table::new(rows));
    }
}

fn mb(bytes: i64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Status => {
            println!("{}", "System Status".cyan().bold());
            println!();

            let client = DomainHubClient::connect(&cli.url)?;
            match client.health().await {
                Ok(health) => {
                    println!("  {} {}", "URL:".bold(), cli.url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!("  {} {}", "Version:".bold(), health.version);
                    println!("  {} {} seconds", "Uptime:".bold(), health.uptime_secs);
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                    return Ok(());
                }
            }

            if cli.email.is_some() && cli.password.is_some() {
                let stats = cli.login().await?.stats().await?.database;
                println!();
                println!("  {} {}", "Users:".bold(), stats.users);
                println!("  {} {}", "Sessions:".bold(), stats.sessions);
                println!("  {} {}", "Domains:".bold(), stats.domains);
                println!("  {} {}", "Pages:".bold(), stats.pages);
                println!("  {} {}", "FAQs:".bold(), stats.faqs);
                println!("  {} {}", "Posts:".bold(), stats.posts);
                println!("  {} {:.2} MB", "DB Size:".bold(), mb(stats.db_size_bytes));
            }
        }

        Commands::Domains { command } => {
            let client = cli.login().await?;
            match command {
                DomainCommands::List => {
                    let rows = client
                        .list_domains()
                        .await?
                        .into_iter()
                        .map(DomainRow::from)
                        .collect();
                    print_table::<DomainRow>(rows, "No domains yet");
                }
                DomainCommands::Create {
                    name,
                    title,
                    description,
                    contact_email,
                } => {
                    let domain = client
                        .create_domain(&DomainInput {
                            name: name.clone(),
                            title: title.clone(),
                            description: description.clone(),
                            contact_email: contact_email.clone(),
                            ..Default::default()
                        })
                        .await?;
                    println!("{}", "✓ Domain created".green().bold());
                    println!();
                    print_table(vec![DomainRow::from(domain)], "");
                }
                DomainCommands::Delete { id } => {
                    client.delete_domain(*id).await?;
                    println!("{}", format!("✓ Domain {} deleted", id).green().bold());
                }
            }
        }

        Commands::Pages {
            command: PageCommands::List { domain_id },
        } => {
            let client = cli.login().await?;
            let rows = client
                .list_pages(*domain_id)
                .await?
                .into_iter()
                .map(PageRow::from)
                .collect();
            print_table::<PageRow>(rows, "No pages for this domain");
        }

        Commands::Posts {
            command: PostCommands::List {
                domain_id,
                published,
            },
        } => {
            let client = cli.login().await?;
            let filter = PostFilter {
                domain_id: *domain_id,
                status: published.then_some(PublishStatus::Published),
            };
            let rows = client
                .list_posts(&filter)
                .await?
                .into_iter()
                .map(PostRow::from)
                .collect();
            print_table::<PostRow>(rows, "No posts found");
        }

        Commands::Users { command } => {
            let client = cli.login().await?;
            match command {
                UserCommands::List => {
                    let rows = client
                        .list_users()
                        .await?
                        .into_iter()
                        .map(UserRow::from)
                        .collect();
                    print_table::<UserRow>(rows, "No users");
                }
                UserCommands::Create {
                    user_email,
                    initial_password,
                    name,
                    admin,
                } => {
                    let user = client
                        .create_user(&NewUser {
                            email: user_email.clone(),
                            password: initial_password.clone(),
                            name: name.clone(),
                            role: if *admin { Role::Admin } else { Role::Editor },
                        })
                        .await?;
                    println!("{}", "✓ User created".green().bold());
                    println!();
                    print_table(vec![UserRow::from(user)], "");
                }
            }
        }

        Commands::Maintenance { force_vacuum } => {
            println!("{}", "Running maintenance...".cyan().bold());
            println!();
            if *force_vacuum {
                println!("  {} Force VACUUM enabled", "•".bold());
            }

            let client = cli.login().await?;
            match client.run_maintenance(*force_vacuum).await {
                Ok(report) => {
                    println!("  ✓ Maintenance completed");
                    println!();
                    if report.vacuumed {
                        println!("  {} VACUUM executed", "✓".green());
                    } else {
                        println!("  ○ VACUUM skipped");
                    }
                    println!(
                        "  {} {} expired sessions purged",
                        "✓".green(),
                        report.purged_sessions
                    );
                    println!();
                    let before = mb(report.db_size_before_bytes);
                    let after = mb(report.db_size_after_bytes);
                    println!("  {} {:.2} MB → {:.2} MB", "DB Size:".bold(), before, after);
                    if before > after {
                        println!("  {} {:.2} MB saved", "💾".bold(), before - after);
                    }
                }
                Err(e) => {
                    println!("  {} Maintenance failed: {}", "✗".red(), e);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_nested_subcommands() {
        let cli = Cli::try_parse_from([
            "domainhub",
            "--url",
            "http://localhost:9000",
            "domains",
            "create",
            "example.com",
            "--title",
            "Example",
        ])
        .unwrap();
        assert_eq!(cli.url, "http://localhost:9000");
        assert!(matches!(
            cli.command,
            Commands::Domains {
                command: DomainCommands::Create { ref name, .. }
            } if name == "example.com"
        ));

        let cli = Cli::try_parse_from(["domainhub", "maintenance", "--force-vacuum"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Maintenance { force_vacuum: true }
        ));

        let cli = Cli::try_parse_from([
            "domainhub",
            "--email",
            "admin@example.com",
            "users",
            "create",
            "editor@example.com",
            "--initial-password",
            "long-enough",
        ])
        .unwrap();
        assert_eq!(cli.email.as_deref(), Some("admin@example.com"));
        assert!(matches!(
            cli.command,
            Commands::Users {
                command: UserCommands::Create { admin: false, .. }
            }
        ));
    }
}
