use clap::{Parser, Subcommand};
use timetracker::{
    config::ServerConfig,
    db,
    models::{CreateUserRequest, UpdateUserRequest, User},
    AppState,
};

#[derive(Parser)]
#[command(name = "timetracker-cli")]
#[command(about = "CLI tool for managing time tracker users and subjects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Subject management commands
    Subject {
        #[command(subcommand)]
        command: SubjectCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all users
    List,

    /// Delete a user
    Delete {
        #[arg(short, long)]
        username: String,
    },

    /// Set a new password for a user
    SetPassword {
        #[arg(short, long)]
        username: String,

        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check a user's password
    Verify {
        #[arg(short, long)]
        username: String,
    },
}

#[derive(Subcommand)]
enum SubjectCommands {
    /// List the subjects of a user
    List {
        #[arg(short, long)]
        username: String,
    },

    /// Add a subject to a user
    Add {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        name: String,
    },

    /// Remove a subject from a user by name
    Remove {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        name: String,
    },
}

fn get_password(prompt: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(rpassword::prompt_password(format!("{}: ", prompt))?)
}

fn confirm_password(prompt: &str) -> Result<(String, String), Box<dyn std::error::Error>> {
    let password = get_password(prompt)?;
    let confirm = get_password("Confirm password")?;
    Ok((password, confirm))
}

fn password_from(
    provided: Option<String>,
    prompt: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let (password, password_confirm) = match provided {
        Some(pw) => (pw.clone(), pw),
        None => confirm_password(prompt)?,
    };

    if password != password_confirm {
        eprintln!("❌ Passwords do not match");
        std::process::exit(1);
    }

    Ok(password)
}

async fn find_user(state: &AppState, username: &str) -> User {
    match state.user_service.get_user_by_username(username).await {
        Ok(user) => user,
        Err(err) => {
            eprintln!("❌ Failed to find user '{}': {}", username, err);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Connect to database
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    db::run_migrations(&pool).await?;

    let state = AppState::new(pool.clone());

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                username,
                email,
                password,
            } => {
                let password = password_from(password, "Password")?;
                let request = CreateUserRequest {
                    username: username.clone(),
                    email,
                    password,
                };

                match state.user_service.create_user(request).await {
                    Ok(id) => {
                        println!("✅ User created successfully!");
                        println!("  ID: {}", id);
                        println!("  Username: {}", username);
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to create user: {}", err);
                        std::process::exit(1);
                    }
                }
            }

            UserCommands::List => match state.user_service.list_users().await {
                Ok(users) => {
                    if users.is_empty() {
                        println!("No users found.");
                    } else {
                        println!(
                            "{:<5} {:<20} {:<40} {:<20}",
                            "ID", "Username", "Email", "Created"
                        );
                        println!("{}", "-".repeat(85));
                        for user in users {
                            println!(
                                "{:<5} {:<20} {:<40} {:<20}",
                                user.id, user.username, user.email, user.created_at
                            );
                        }
                    }
                }
                Err(err) => {
                    eprintln!("❌ Failed to list users: {}", err);
                    std::process::exit(1);
                }
            },

            UserCommands::Delete { username } => {
                let user = find_user(&state, &username).await;
                match state.user_service.delete_user(user.id).await {
                    Ok(()) => println!("✅ User '{}' deleted successfully!", username),
                    Err(err) => {
                        eprintln!("❌ Failed to delete user: {}", err);
                        std::process::exit(1);
                    }
                }
            }

            UserCommands::SetPassword { username, password } => {
                let user = find_user(&state, &username).await;
                let password = password_from(password, "New password")?;
                let request = UpdateUserRequest {
                    password,
                    ..Default::default()
                };

                match state.user_service.update_user(user.id, request).await {
                    Ok(_) => println!("✅ Password updated successfully for '{}'!", username),
                    Err(err) => {
                        eprintln!("❌ Failed to update password: {}", err);
                        std::process::exit(1);
                    }
                }
            }

            UserCommands::Verify { username } => {
                let password = get_password("Password")?;
                match state
                    .user_service
                    .verify_credentials(&username, &password)
                    .await
                {
                    Ok(true) => println!("✅ Password matches for '{}'", username),
                    Ok(false) => {
                        eprintln!("❌ Password does not match for '{}'", username);
                        std::process::exit(1);
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to verify user: {}", err);
                        std::process::exit(1);
                    }
                }
            }
        },

        Commands::Subject { command } => match command {
            SubjectCommands::List { username } => {
                let user = find_user(&state, &username).await;
                match state.subject_service.list_for_user(user.id).await {
                    Ok(subjects) if subjects.is_empty() => println!("No subjects found."),
                    Ok(subjects) => {
                        println!("{:<5} {:<40}", "ID", "Name");
                        println!("{}", "-".repeat(45));
                        for subject in subjects {
                            println!("{:<5} {:<40}", subject.id, subject.name);
                        }
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to list subjects: {}", err);
                        std::process::exit(1);
                    }
                }
            }

            SubjectCommands::Add { username, name } => {
                let user = find_user(&state, &username).await;
                match state.subject_service.create_subject(user.id, &name).await {
                    Ok(subject) => {
                        println!("✅ Subject '{}' added (ID {})", subject.name, subject.id)
                    }
                    Err(err) => {
                        eprintln!("❌ Failed to add subject: {}", err);
                        std::process::exit(1);
                    }
                }
            }

            SubjectCommands::Remove { username, name } => {
                let user = find_user(&state, &username).await;
                match state
                    .subject_service
                    .delete_subject_by_name(user.id, &name)
                    .await
                {
                    Ok(()) => println!("✅ Subject '{}' removed", name),
                    Err(err) => {
                        eprintln!("❌ Failed to remove subject: {}", err);
                        std::process::exit(1);
                    }
                }
            }
        },
    }

    pool.close().await;

    Ok(())
}
