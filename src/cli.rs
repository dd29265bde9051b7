//! Command-line interface definitions.
//!
//! Every command maps onto one screen action. Arguments left out of `add`,
//! `tag`, `copy` and `move` are asked for interactively.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::screens::Interaction;
use crate::search::Combinator;

#[derive(Parser, Debug)]
#[command(name = "shoebox")]
#[command(version, about = "Organize photos into per-user albums", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and list what the user may open
    Login { name: String },

    /// Manage users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Manage a user's albums
    Albums {
        user: String,
        #[command(subcommand)]
        action: AlbumAction,
    },

    /// Manage the photos of one album
    Photos {
        user: String,
        album: String,
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// Search all albums of a user and save the hits as a new album
    Search {
        user: String,
        #[command(subcommand)]
        query: SearchQuery,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminAction {
    List,
    Add { name: String },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum AlbumAction {
    List,
    Add { name: String },
    Rename { current: String, new_name: String },
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum PhotoAction {
    List,
    /// Show metadata and thumbnail status
    Show { path: String },
    Add { path: Option<String> },
    /// Add every supported image below a directory
    Import { dir: PathBuf },
    Remove { path: String },
    Caption { path: String, text: String },
    /// Tag with `name:value`
    Tag { path: String, tag: Option<String> },
    Untag { path: String, tag: String },
    Copy { path: String, dest: Option<String> },
    Move { path: String, dest: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum SearchQuery {
    /// Photos modified strictly between two `MM/DD/YYYY` dates
    Date {
        #[arg(long, default_value = "")]
        from: String,
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Photos matching `name=value` clauses
    Tags(TagArgs),
}

#[derive(Args, Debug)]
pub struct TagArgs {
    pub clause: String,

    /// Second clause, both must match
    #[arg(long, conflicts_with = "or")]
    pub and: Option<String>,

    /// Second clause, either may match
    #[arg(long)]
    pub or: Option<String>,
}

impl TagArgs {
    /// The second clause and how it combines with the first.
    pub fn second(&self) -> (&str, Option<Combinator>) {
        match (&self.and, &self.or) {
            (Some(c), _) => (c.as_str(), Some(Combinator::And)),
            (None, Some(c)) => (c.as_str(), Some(Combinator::Or)),
            (None, None) => ("", None),
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Terminal prompts through `dialoguer`.
pub struct DialoguerInteraction {
    theme: dialoguer::theme::ColorfulTheme,
}

impl DialoguerInteraction {
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for DialoguerInteraction {
    fn confirm(&mut self, message: &str) -> bool {
        use dialoguer::Confirm;

        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!("Confirmation aborted: {}", e);
                false
            })
    }

    fn prompt_text(&mut self, message: &str) -> Option<String> {
        use dialoguer::Input;

        match Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
        {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("Prompt aborted: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_photo_commands() {
        let cli = Cli::try_parse_from(["shoebox", "photos", "ann", "trip", "add"]).unwrap();
        match cli.command {
            Commands::Photos { user, album, action: PhotoAction::Add { path } } => {
                assert_eq!((user.as_str(), album.as_str()), ("ann", "trip"));
                assert!(path.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_tag_search() {
        let cli = Cli::try_parse_from([
            "shoebox", "search", "ann", "tags", "color=red", "--or", "color=blue",
        ])
        .unwrap();
        let Commands::Search { query: SearchQuery::Tags(args), .. } = cli.command else {
            panic!("expected tag search");
        };
        assert_eq!(args.second(), ("color=blue", Some(Combinator::Or)));

        assert!(Cli::try_parse_from([
            "shoebox", "search", "ann", "tags", "a=b", "--and", "c=d", "--or", "e=f",
        ])
        .is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["shoebox", "admin", "delete", "ann", "--yes"]).unwrap();
        assert!(cli.yes);
        assert!(cli.config.is_none());
    }
}
