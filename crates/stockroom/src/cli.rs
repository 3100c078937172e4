use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stockroom", version, about = "Inventory items in the terminal")]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT")]
    pub tick_rate: Option<f64>,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT")]
    pub frame_rate: Option<f64>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Browse the item table (default)
    Browse,
    /// Open the form for a new item
    New,
    /// Open the form for an existing item
    Edit {
        /// Item id as stored by the gateway
        // pushed database keys start with `-`
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Print all items and exit
    List {
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn command(&self) -> Cmd {
        self.cmd.clone().unwrap_or(Cmd::Browse)
    }
}
