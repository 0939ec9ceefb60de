// Output formatting for the CLI.

pub mod terminal;
