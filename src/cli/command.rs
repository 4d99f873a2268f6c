use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    #[command(
        about = "Create the database schema and exit",
        long_about = "Open the SQLite database under the data directory, apply the schema if missing, and exit without serving."
    )]
    Init,
    #[command(
        about = "Load the demo data set and exit",
        long_about = "Insert four coordinators, four courses, five students and their enrollments. Does nothing when coordinators already exist."
    )]
    Seed,
}
