use anyhow::{bail, Context, Result};

use shoebox::cli::{
    AdminAction, AlbumAction, Cli, Commands, DialoguerInteraction, PhotoAction, SearchQuery,
};
use shoebox::config::Config;
use shoebox::logging;
use shoebox::model::Tag;
use shoebox::screens::{AssumeYes, Interaction, LoginScreen, NavContext, Navigator, Route, Screen};
use shoebox::thumbnails::{ThumbnailManager, ThumbnailStatus};
use shoebox::{JsonStore, ShoeboxError};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    logging::init(&Config::config_dir().join("logs"))?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().context("Failed to load configuration")?,
    };

    tracing::info!(store = ?config.store_path, "Starting shoebox");

    if let Err(e) = run(cli, &config) {
        if let Some(validation) = e.downcast_ref::<ShoeboxError>().and_then(|e| e.as_validation()) {
            eprintln!("{}", validation);
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let store = JsonStore::new(&config.store_path, &config.stock.dir);
    let nav = Navigator::new(&store);

    let mut dialoguer = DialoguerInteraction::new();
    let mut assume_yes = AssumeYes;
    let ui: &mut dyn Interaction = if cli.yes {
        &mut assume_yes
    } else {
        &mut dialoguer
    };

    match cli.command {
        Commands::Login { name } => match LoginScreen::new(&store).attempt(&name)? {
            Route::Admin(admin) => {
                println!("Logged in as administrator. Users:");
                for user in admin.users()? {
                    println!("  {}", user);
                }
            }
            Route::Albums(albums) => {
                println!("Logged in as {}. Albums:", name);
                for summary in albums.list()? {
                    println!("  {}", summary);
                }
            }
            other => bail!("Login opened unexpected screen {}", other.screen()),
        },

        Commands::Admin { action } => {
            let Route::Admin(admin) = nav.change_screen(Screen::Admin, &NavContext::default())?
            else {
                bail!("Could not open admin screen");
            };
            match action {
                AdminAction::List => {
                    for user in admin.users()? {
                        println!("{}", user);
                    }
                }
                AdminAction::Add { name } => {
                    admin.add_user(&name)?;
                    println!("Added user {}", name);
                }
                AdminAction::Delete { name } => {
                    if admin.delete_user(&name, ui)? {
                        println!("Deleted user {}", name);
                    }
                }
            }
        }

        Commands::Albums { user, action } => {
            let context = NavContext::new(Some(&user), None);
            let Route::Albums(albums) = nav.change_screen(Screen::Albums, &context)? else {
                bail!("Could not open albums of {}", user);
            };
            match action {
                AlbumAction::List => {
                    println!("Name | Photos | Date range");
                    for summary in albums.list()? {
                        println!("{}", summary);
                    }
                }
                AlbumAction::Add { name } => {
                    albums.add(&name)?;
                    println!("Added album {}", name);
                }
                AlbumAction::Rename { current, new_name } => {
                    albums.rename(&current, &new_name)?;
                    println!("Renamed {} to {}", current, new_name);
                }
                AlbumAction::Delete { name } => {
                    if albums.delete(&name, ui)? {
                        println!("Deleted album {}", name);
                    }
                }
            }
        }

        Commands::Photos { user, album, action } => {
            let context = NavContext::new(Some(&user), Some(&album));
            let Route::Photos(photos) = nav.change_screen(Screen::Photos, &context)? else {
                bail!("Could not open album {}", album);
            };
            match action {
                PhotoAction::List => {
                    for entry in photos.list()? {
                        let marker = if entry.present { "" } else { " (missing)" };
                        println!("{} | {} | {}{}", entry.path, entry.date, entry.caption, marker);
                    }
                }
                PhotoAction::Show { path } => {
                    let thumbnails = ThumbnailManager::new(&config.thumbnails);
                    let details = photos.details(&path, &thumbnails)?;
                    println!("Path:     {}", details.entry.path);
                    println!("Date:     {}", details.entry.date);
                    println!("Caption:  {}", details.entry.caption);
                    for tag in &details.entry.tags {
                        println!("Tag:      {}", tag);
                    }
                    println!("Preview:  {}", describe_thumbnail(&details.thumbnail));
                }
                PhotoAction::Add { path } => {
                    if photos.add(path.as_deref(), ui)? {
                        println!("Photo added");
                    }
                }
                PhotoAction::Import { dir } => {
                    let report = photos.import_directory(&dir)?;
                    for (path, reason) in &report.skipped {
                        println!("Skipped {}: {}", path, reason);
                    }
                    println!("Imported {} photos", report.added.len());
                }
                PhotoAction::Remove { path } => {
                    if photos.remove(&path, ui)? {
                        println!("Removed {}", path);
                    }
                }
                PhotoAction::Caption { path, text } => {
                    photos.set_caption(&path, &text)?;
                }
                PhotoAction::Tag { path, tag } => {
                    if photos.add_tag(&path, tag.as_deref(), ui)? {
                        println!("Tagged {}", path);
                    }
                }
                PhotoAction::Untag { path, tag } => {
                    let tag = Tag::parse_authored(&tag).map_err(ShoeboxError::from)?;
                    if photos.delete_tag(&path, &tag, ui)? {
                        println!("Removed tag {}", tag);
                    }
                }
                PhotoAction::Copy { path, dest } => {
                    if photos.copy_to(&path, dest.as_deref(), ui)? {
                        println!("Copied {}", path);
                    }
                }
                PhotoAction::Move { path, dest } => {
                    if photos.move_to(&path, dest.as_deref(), ui)? {
                        println!("Moved {}", path);
                    }
                }
            }
        }

        Commands::Search { user, query } => {
            let context = NavContext::new(Some(&user), None);
            let Route::Search(search) = nav.change_screen(Screen::Search, &context)? else {
                bail!("Could not open search for {}", user);
            };
            let outcome = match &query {
                SearchQuery::Date { from, to } => search.by_date(from, to)?,
                SearchQuery::Tags(args) => {
                    let (second, combinator) = args.second();
                    search.by_tags(&args.clause, second, combinator)?
                }
            };
            println!("Saved {} photos to {}", outcome.count, outcome.album);
        }
    }

    Ok(())
}

fn describe_thumbnail(status: &ThumbnailStatus) -> String {
    match status {
        ThumbnailStatus::Ready(path) => path.display().to_string(),
        ThumbnailStatus::Missing => "file is missing".to_string(),
        ThumbnailStatus::Failed(reason) => format!("unavailable ({})", reason),
        ThumbnailStatus::Disabled => "disabled".to_string(),
    }
}
