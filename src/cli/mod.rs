use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP service exposing POST /query
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Answer one question and print the HTML fragment
    Ask {
        query: String,

        /// Number of context documents to retrieve
        #[arg(long, default_value = "3")]
        num: usize,
    },
}
