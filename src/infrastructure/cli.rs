use clap::{Parser, Subcommand};

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Hoaxify server root, overriding the configured one
    #[arg(long, value_name = "URL", env = "HOAXIFY_BASE_URL")]
    pub base_url: Option<String>,

    /// Open this user's page on startup
    #[arg(short, long, value_name = "USERNAME")]
    pub user: Option<String>,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 1.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub frame_rate: f64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create an account and exit
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        display_name: String,
        #[arg(long)]
        password: String,
    },
    /// Post a hoax with the configured credentials and exit
    Post { content: String },
}
