use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use handyhub::cli::create_admin;
use handyhub_config::DatabaseConfig;
use handyhub_db::PgStore;

#[derive(Parser)]
#[command(name = "handyhub-cli")]
#[command(about = "HandyHub CLI - Administrative tools for HandyHub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the administrator
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the administrator
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env();
    if config.url.is_none() {
        anyhow::bail!("DATABASE_URL must be set");
    }
    let store = PgStore::connect(&config).await?;

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_admin(&store, first_name, last_name, email, password).await,
    }
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::new().with_prompt(label).interact_text()?),
    }
}

async fn handle_create_admin(
    store: &PgStore,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let first_name = prompt(first_name, "First name")?;
    let last_name = prompt(last_name, "Last name")?;
    let email = prompt(email, "Email address")?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let admin = create_admin(store, &first_name, &last_name, &email, &password).await?;

    println!("\n✅ Administrator created successfully!");
    println!("   Email: {}", admin.email);
    println!("   Name: {} {}", admin.first_name, admin.last_name);
    Ok(())
}
